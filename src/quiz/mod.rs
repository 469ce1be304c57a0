use std::time::Duration;

// Score thresholds for the final severity buckets
const SEVERE_SCORE: i32 = 6;
const MODERATE_SCORE: i32 = 3;

// Short pause between an answer and the next question, so the user
// sees their choice acknowledged before the quiz moves on
pub const ANSWER_PAUSE: Duration = Duration::from_millis(500);

#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct Quiz {
    pub questions: Vec<Question>,
    pub current_question: usize,
    pub score: i32,
}

impl Quiz {
    pub fn new(questions: Vec<Question>) -> Self {
        Self {
            questions,
            current_question: 0,
            score: 0,
        }
    }

    /// The built-in "how sick are you today?" quiz.
    pub fn sick_day() -> Self {
        Self::new(vec![
            Question::new("Question 1: Are you constantly reaching for a tissue?", 1, 0),
            Question::new(
                "Question 2: Does the thought of moving from the couch feel like a marathon?",
                2,
                0,
            ),
            Question::new(
                "Question 3: Is your throat scratchy, or does your head feel foggy?",
                2,
                0,
            ),
            Question::new(
                "Question 4: Do you feel colder than everyone else in the room?",
                1,
                0,
            ),
        ])
    }

    pub fn reset(&mut self) {
        self.current_question = 0;
        self.score = 0;
    }

    pub fn is_complete(&self) -> bool {
        return self.current_question >= self.questions.len();
    }

    pub fn current(&self) -> Option<&Question> {
        self.questions.get(self.current_question)
    }

    /// Records an answer to the current question and advances the quiz.
    /// Does nothing once the last question has been answered; the quiz
    /// has to be `reset` before it accepts answers again.
    pub fn answer(&mut self, choice: Choice) -> bool {
        let question = match self.current() {
            Some(question) => question,
            None => return false,
        };

        self.score += match choice {
            Choice::Yes => question.yes_score,
            Choice::No => question.no_score,
        };
        self.current_question += 1;
        return true;
    }

    /// The severity bucket for the accumulated score. Only available
    /// once every question has been answered.
    pub fn bucket(&self) -> Option<Bucket> {
        if !self.is_complete() {
            return None;
        }
        Some(Bucket::from_score(self.score))
    }
}

#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct Question {
    pub text: String,
    pub yes_score: i32,
    pub no_score: i32,
}

impl Question {
    pub fn new(text: &str, yes_score: i32, no_score: i32) -> Self {
        Self {
            text: text.to_string(),
            yes_score,
            no_score,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Choice {
    Yes,
    No,
}

impl Choice {
    pub fn parse(text: &str) -> Option<Self> {
        match text {
            "Yes" => Some(Choice::Yes),
            "No" => Some(Choice::No),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bucket {
    Mild,
    Moderate,
    Severe,
}

impl Bucket {
    fn from_score(score: i32) -> Self {
        if score >= SEVERE_SCORE {
            return Bucket::Severe;
        }
        if score >= MODERATE_SCORE {
            return Bucket::Moderate;
        }
        return Bucket::Mild;
    }

    pub fn message(&self) -> &'static str {
        match self {
            Bucket::Severe => {
                "Uh Oh! Your body is sending out <b>'Take a Break' signals!</b> You might be coming down with something serious. Time to power down, get some rest, and maybe drink some hot tea!"
            }
            Bucket::Moderate => {
                "You're at <b>Half-Power</b>. Your immune system is on high alert. Take it easy today, stay hydrated, and listen to your body before it escalates!"
            }
            Bucket::Mild => {
                "You're <b>Good to Go!</b> Your score is low, but remember to maintain your healthy habits. You're fighting fit!"
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_yes_answers_hit_the_severe_bucket() {
        let mut quiz = Quiz::sick_day();
        while !quiz.is_complete() {
            assert!(quiz.answer(Choice::Yes));
        }
        assert_eq!(quiz.score, 6);
        assert_eq!(quiz.bucket(), Some(Bucket::Severe));
    }

    #[test]
    fn all_no_answers_stay_mild() {
        let mut quiz = Quiz::sick_day();
        while !quiz.is_complete() {
            assert!(quiz.answer(Choice::No));
        }
        assert_eq!(quiz.score, 0);
        assert_eq!(quiz.bucket(), Some(Bucket::Mild));
    }

    #[test]
    fn middling_score_lands_in_moderate() {
        let mut quiz = Quiz::sick_day();
        quiz.answer(Choice::Yes); // +1
        quiz.answer(Choice::Yes); // +2
        quiz.answer(Choice::No);
        quiz.answer(Choice::No);
        assert_eq!(quiz.score, 3);
        assert_eq!(quiz.bucket(), Some(Bucket::Moderate));
    }

    #[test]
    fn no_bucket_before_the_quiz_is_done() {
        let mut quiz = Quiz::sick_day();
        assert_eq!(quiz.bucket(), None);
        quiz.answer(Choice::Yes);
        assert_eq!(quiz.bucket(), None);
    }

    #[test]
    fn answers_are_ignored_after_the_last_question() {
        let mut quiz = Quiz::sick_day();
        for _ in 0..quiz.questions.len() {
            quiz.answer(Choice::Yes);
        }
        let final_score = quiz.score;

        assert!(!quiz.answer(Choice::Yes));
        assert_eq!(quiz.score, final_score);
        assert_eq!(quiz.current_question, quiz.questions.len());
    }

    #[test]
    fn reset_rewinds_partial_progress() {
        let mut quiz = Quiz::sick_day();
        quiz.answer(Choice::Yes);
        quiz.answer(Choice::Yes);
        assert_eq!(quiz.current_question, 2);

        quiz.reset();
        assert_eq!(quiz.current_question, 0);
        assert_eq!(quiz.score, 0);
        assert_eq!(
            quiz.current().map(|q| q.text.as_str()),
            Some("Question 1: Are you constantly reaching for a tissue?")
        );
    }

    #[test]
    fn negative_deltas_are_honoured() {
        // The shipped questions only score upwards, but the engine
        // must not rely on that
        let mut quiz = Quiz::new(vec![
            Question::new("Feeling great?", -2, 0),
            Question::new("Feeling awful?", 4, 0),
        ]);
        quiz.answer(Choice::Yes);
        quiz.answer(Choice::Yes);
        assert_eq!(quiz.score, 2);
        assert_eq!(quiz.bucket(), Some(Bucket::Mild));
    }

    #[test]
    fn choice_parsing_only_accepts_the_two_buttons() {
        assert_eq!(Choice::parse("Yes"), Some(Choice::Yes));
        assert_eq!(Choice::parse("No"), Some(Choice::No));
        assert_eq!(Choice::parse("maybe"), None);
        assert_eq!(Choice::parse("yes please"), None);
    }
}
