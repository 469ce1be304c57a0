//! The symptom checker: maps a set of ticked symptoms to one of a few
//! canned advisory messages.

// An ailment only counts as a strong match if at least this many of
// its symptoms were selected
const STRONG_MATCH: usize = 3;

pub struct Symptom {
    pub tag: &'static str,
    pub label: &'static str,
}

/// The full symptom vocabulary, in the order it is shown on the keyboard.
pub const SYMPTOMS: [Symptom; 10] = [
    Symptom { tag: "runny-nose", label: "Runny nose" },
    Symptom { tag: "sneezing", label: "Sneezing" },
    Symptom { tag: "sore-throat", label: "Sore throat" },
    Symptom { tag: "headache", label: "Headache" },
    Symptom { tag: "fever", label: "Fever" },
    Symptom { tag: "cough", label: "Cough" },
    Symptom { tag: "body-aches", label: "Body aches" },
    Symptom { tag: "fatigue", label: "Fatigue" },
    Symptom { tag: "nausea", label: "Nausea" },
    Symptom { tag: "stomach-pain", label: "Stomach pain" },
];

pub fn symptom_by_label(label: &str) -> Option<&'static Symptom> {
    SYMPTOMS.iter().find(|symptom| symptom.label == label)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultKey {
    Cold,
    Flu,
    Gastro,
    Mixed,
    Minor,
    None,
}

pub struct Ailment {
    pub key: ResultKey,
    pub symptoms: &'static [&'static str],
}

// Declaration order matters: ties are resolved by the order ailments
// are visited (see best_match)
const COMMON_AILMENTS: [Ailment; 3] = [
    // Respiratory/Cold
    Ailment {
        key: ResultKey::Cold,
        symptoms: &["runny-nose", "sneezing", "sore-throat", "headache"],
    },
    // Flu-like
    Ailment {
        key: ResultKey::Flu,
        symptoms: &["fever", "cough", "body-aches", "fatigue", "headache"],
    },
    // Gastro-related
    Ailment {
        key: ResultKey::Gastro,
        symptoms: &["nausea", "stomach-pain", "fever"],
    },
];

/// Matches the selected symptom tags against the ailment table.
/// Pure function of the selection; callers rebuild the selection from
/// the live toggle state on every check.
pub fn check_symptoms(selected: &[String]) -> ResultKey {
    best_match(&COMMON_AILMENTS, selected)
}

fn best_match(ailments: &[Ailment], selected: &[String]) -> ResultKey {
    if selected.is_empty() {
        return ResultKey::None;
    }

    let mut best_match = ResultKey::Minor;
    let mut max_match_count = 0;

    for ailment in ailments {
        let match_count = ailment
            .symptoms
            .iter()
            .filter(|&&symptom| selected.iter().any(|s| s.as_str() == symptom))
            .count();

        if match_count >= STRONG_MATCH && match_count > max_match_count {
            max_match_count = match_count;
            best_match = ailment.key;
        } else if match_count >= STRONG_MATCH && match_count == max_match_count {
            // Two ailments match equally well, so don't pick either.
            // Note that a later, strictly better match still wins: the
            // running max_match_count belongs to the last ailment that
            // took the lead, never to the mixed verdict itself
            best_match = ResultKey::Mixed;
        }
    }

    return best_match;
}

pub fn advisory_message(key: ResultKey) -> &'static str {
    match key {
        ResultKey::Cold => {
            "You have selected symptoms common to a <b>Cold</b>. Rest, stay hydrated, and consider over-the-counter relief. Symptoms are usually mild."
        }
        ResultKey::Flu => {
            "Your symptoms are highly suggestive of a <b>Flu-like illness</b>. The flu can be serious. We recommend contacting a healthcare professional, especially if your fever is high."
        }
        ResultKey::Gastro => {
            "Your symptoms suggest a <b>Gastrointestinal upset</b> (Stomach Flu/Bug). Focus on fluids and a bland diet. Seek immediate help if symptoms are severe or persistent."
        }
        ResultKey::Mixed => {
            "Your symptoms are a <b>mix of common ailments</b>. It could be one or several things. Monitor your symptoms, and see a doctor if they worsen or do not improve."
        }
        ResultKey::Minor => {
            "You have selected <b>minor symptoms</b>. Rest and hydration are usually all that's needed. If you feel worse, please check again or call a doctor."
        }
        ResultKey::None => "Please select at least one symptom to check.",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn selection(tags: &[&str]) -> Vec<String> {
        tags.iter().map(|tag| tag.to_string()).collect()
    }

    #[test]
    fn empty_selection_asks_for_input() {
        assert_eq!(check_symptoms(&[]), ResultKey::None);
    }

    #[test]
    fn lone_symptom_is_minor() {
        assert_eq!(check_symptoms(&selection(&["headache"])), ResultKey::Minor);
    }

    #[test]
    fn two_cold_symptoms_stay_below_the_threshold() {
        let selected = selection(&["runny-nose", "sneezing"]);
        assert_eq!(check_symptoms(&selected), ResultKey::Minor);
    }

    #[test]
    fn three_cold_symptoms_match_cold() {
        let selected = selection(&["runny-nose", "sneezing", "sore-throat"]);
        assert_eq!(check_symptoms(&selected), ResultKey::Cold);
    }

    #[test]
    fn full_flu_set_dominates_the_shared_headache() {
        let selected = selection(&["fever", "cough", "body-aches", "fatigue", "headache"]);
        assert_eq!(check_symptoms(&selected), ResultKey::Flu);
    }

    #[test]
    fn gastro_set_matches_gastro() {
        let selected = selection(&["nausea", "stomach-pain", "fever"]);
        assert_eq!(check_symptoms(&selected), ResultKey::Gastro);
    }

    #[test]
    fn equal_strong_matches_come_back_mixed() {
        // Cold and gastro both reach exactly three matches
        let selected = selection(&[
            "runny-nose",
            "sneezing",
            "sore-throat",
            "nausea",
            "stomach-pain",
            "fever",
        ]);
        assert_eq!(check_symptoms(&selected), ResultKey::Mixed);
    }

    #[test]
    fn later_stronger_match_overrides_an_earlier_tie() {
        // Fixture table: the first two ailments tie at three matches,
        // then the third beats them with four, so the mixed verdict
        // must be discarded in its favour
        const FIXTURE: [Ailment; 3] = [
            Ailment {
                key: ResultKey::Cold,
                symptoms: &["a", "b", "c"],
            },
            Ailment {
                key: ResultKey::Flu,
                symptoms: &["a", "b", "d"],
            },
            Ailment {
                key: ResultKey::Gastro,
                symptoms: &["a", "b", "c", "d"],
            },
        ];
        let selected = selection(&["a", "b", "c", "d"]);
        assert_eq!(best_match(&FIXTURE, &selected), ResultKey::Gastro);
    }

    #[test]
    fn unknown_tags_never_contribute_to_a_match() {
        let selected = selection(&["runny-nose", "sneezing", "left-elbow"]);
        assert_eq!(check_symptoms(&selected), ResultKey::Minor);
    }

    #[test]
    fn checking_twice_gives_the_same_answer() {
        let selected = selection(&["fever", "cough", "body-aches"]);
        assert_eq!(check_symptoms(&selected), check_symptoms(&selected));
    }

    #[test]
    fn every_symptom_label_resolves_to_its_tag() {
        for symptom in &SYMPTOMS {
            let found = symptom_by_label(symptom.label).unwrap();
            assert_eq!(found.tag, symptom.tag);
        }
        assert!(symptom_by_label("Left elbow").is_none());
    }
}
