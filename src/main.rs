mod checker;
mod quiz;

use quiz::{Choice, Quiz};
use teloxide::{
    dispatching::dialogue::{serializer::Json, ErasedStorage, SqliteStorage, Storage},
    prelude::*,
    types::{ChatAction, KeyboardButton, KeyboardMarkup, ParseMode},
};

type BotDialogue = Dialogue<State, ErasedStorage<State>>;
type HandlerResult = Result<(), Box<dyn std::error::Error + Send + Sync>>;

#[derive(Clone, Default, serde::Serialize, serde::Deserialize)]
pub enum State {
    #[default]
    Start,
    ReceiveActivityChoice,
    SymptomChecker {
        selected: Vec<String>,
    },
    SickDayQuiz {
        quiz: Quiz,
    },
}

type StateStorage = std::sync::Arc<ErasedStorage<State>>;

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();

    pretty_env_logger::init();
    log::info!("Starting wellness bot...");

    let bot = Bot::from_env();

    println!("Establishing connection to the database...");
    let storage: StateStorage = SqliteStorage::open("db.sqlite", Json)
        .await
        .expect("Failed to open the dialogue database")
        .erase();
    println!("Connection established");

    Dispatcher::builder(
        bot,
        Update::filter_message()
            .enter_dialogue::<Message, ErasedStorage<State>, State>()
            .branch(dptree::case![State::Start].endpoint(start))
            .branch(dptree::case![State::ReceiveActivityChoice].endpoint(receive_activity_choice))
            .branch(dptree::case![State::SymptomChecker { selected }].endpoint(symptom_checker))
            .branch(dptree::case![State::SickDayQuiz { quiz }].endpoint(sick_day_quiz)),
    )
    .dependencies(dptree::deps![storage])
    .enable_ctrlc_handler()
    .build()
    .dispatch()
    .await;
}

const GREETING_TEXT: &str =
    "Hi! I'm the wellness bot. I can check your symptoms against a few common ailments, or run a quick sick-day quiz. What would you like to do?";
const SYMPTOM_CHECKER_ACTIVITY: &str = "Check my symptoms";
const SICK_DAY_QUIZ_ACTIVITY: &str = "Take the sick-day quiz";

const CHECK_BUTTON: &str = "Check symptoms";
const BACK_BUTTON: &str = "Back to menu";
const RETAKE_BUTTON: &str = "Take it again";
const TICK_PREFIX: &str = "☑ ";

fn activity_keyboard() -> KeyboardMarkup {
    KeyboardMarkup::new(vec![vec![
        KeyboardButton::new(SYMPTOM_CHECKER_ACTIVITY),
        KeyboardButton::new(SICK_DAY_QUIZ_ACTIVITY),
    ]])
}

// Symptom buttons two per row, ticked ones marked, plus a control row
fn symptom_keyboard(selected: &[String]) -> KeyboardMarkup {
    let mut rows: Vec<Vec<KeyboardButton>> = checker::SYMPTOMS
        .chunks(2)
        .map(|pair| {
            pair.iter()
                .map(|symptom| {
                    let ticked = selected.iter().any(|tag| tag == symptom.tag);
                    if ticked {
                        KeyboardButton::new(format!("{}{}", TICK_PREFIX, symptom.label))
                    } else {
                        KeyboardButton::new(symptom.label)
                    }
                })
                .collect()
        })
        .collect();
    rows.push(vec![
        KeyboardButton::new(CHECK_BUTTON),
        KeyboardButton::new(BACK_BUTTON),
    ]);
    KeyboardMarkup::new(rows)
}

fn answer_keyboard() -> KeyboardMarkup {
    KeyboardMarkup::new(vec![vec![
        KeyboardButton::new("Yes"),
        KeyboardButton::new("No"),
    ]])
}

fn quiz_end_keyboard() -> KeyboardMarkup {
    KeyboardMarkup::new(vec![vec![
        KeyboardButton::new(RETAKE_BUTTON),
        KeyboardButton::new(BACK_BUTTON),
    ]])
}

async fn start(bot: Bot, dialogue: BotDialogue, msg: Message) -> HandlerResult {
    bot.send_message(msg.chat.id, GREETING_TEXT)
        .reply_markup(activity_keyboard())
        .await?;

    dialogue.update(State::ReceiveActivityChoice).await?;
    Ok(())
}

async fn receive_activity_choice(bot: Bot, dialogue: BotDialogue, msg: Message) -> HandlerResult {
    match msg.text() {
        Some(SYMPTOM_CHECKER_ACTIVITY) => {
            let selected: Vec<String> = Vec::new();
            bot.send_message(
                msg.chat.id,
                "Tap every symptom you're feeling, then hit \"Check symptoms\".",
            )
            .reply_markup(symptom_keyboard(&selected))
            .await?;

            dialogue.update(State::SymptomChecker { selected }).await?;
            return Ok(());
        }
        Some(SICK_DAY_QUIZ_ACTIVITY) => {
            let quiz = Quiz::sick_day();
            bot.send_message(msg.chat.id, "Four quick questions. Let's see how you're holding up!")
                .await?;
            if let Some(question) = quiz.current() {
                bot.send_message(msg.chat.id, question.text.clone())
                    .reply_markup(answer_keyboard())
                    .await?;
            }

            dialogue.update(State::SickDayQuiz { quiz }).await?;
            return Ok(());
        }
        _ => {
            bot.send_message(msg.chat.id, "Please pick one of the options")
                .reply_markup(activity_keyboard())
                .await?;
            return Ok(());
        }
    }
}

async fn symptom_checker(
    bot: Bot,
    dialogue: BotDialogue,
    selected: Vec<String>,
    msg: Message,
) -> HandlerResult {
    let text = match msg.text() {
        Some(text) => text,
        None => {
            bot.send_message(msg.chat.id, "Please use the buttons below")
                .await?;
            return Ok(());
        }
    };

    match text {
        CHECK_BUTTON => {
            // The verdict is recomputed from the current toggle state on
            // every check; an empty selection is a normal outcome, not
            // an error
            let result = checker::check_symptoms(&selected);
            bot.send_message(msg.chat.id, checker::advisory_message(result))
                .parse_mode(ParseMode::Html)
                .reply_markup(symptom_keyboard(&selected))
                .await?;
            Ok(())
        }
        BACK_BUTTON => {
            bot.send_message(msg.chat.id, "What would you like to do next?")
                .reply_markup(activity_keyboard())
                .await?;
            dialogue.update(State::ReceiveActivityChoice).await?;
            Ok(())
        }
        other => {
            let label = other.strip_prefix(TICK_PREFIX).unwrap_or(other);
            let symptom = match checker::symptom_by_label(label) {
                Some(symptom) => symptom,
                None => {
                    bot.send_message(msg.chat.id, "Please use the buttons below")
                        .reply_markup(symptom_keyboard(&selected))
                        .await?;
                    return Ok(());
                }
            };

            let mut selected = selected;
            match selected.iter().position(|tag| tag == symptom.tag) {
                Some(position) => {
                    selected.remove(position);
                }
                None => selected.push(symptom.tag.to_string()),
            }

            bot.send_message(msg.chat.id, selection_summary(&selected))
                .reply_markup(symptom_keyboard(&selected))
                .await?;

            dialogue.update(State::SymptomChecker { selected }).await?;
            Ok(())
        }
    }
}

fn selection_summary(selected: &[String]) -> String {
    if selected.is_empty() {
        return "Nothing selected yet.".to_string();
    }
    let labels = checker::SYMPTOMS
        .iter()
        .filter(|symptom| selected.iter().any(|tag| tag == symptom.tag))
        .map(|symptom| symptom.label)
        .collect::<Vec<_>>()
        .join(", ");
    format!("Selected: {}", labels)
}

async fn sick_day_quiz(
    bot: Bot,
    dialogue: BotDialogue,
    quiz: Quiz,
    msg: Message,
) -> HandlerResult {
    let text = match msg.text() {
        Some(text) => text,
        None => {
            bot.send_message(msg.chat.id, "Please use the buttons below")
                .await?;
            return Ok(());
        }
    };

    // Once the last question has been answered, only the end-of-quiz
    // controls do anything
    if quiz.is_complete() {
        match text {
            RETAKE_BUTTON => {
                let mut quiz = quiz;
                quiz.reset();
                if let Some(question) = quiz.current() {
                    bot.send_message(msg.chat.id, question.text.clone())
                        .reply_markup(answer_keyboard())
                        .await?;
                }
                dialogue.update(State::SickDayQuiz { quiz }).await?;
            }
            BACK_BUTTON => {
                bot.send_message(msg.chat.id, "What would you like to do next?")
                    .reply_markup(activity_keyboard())
                    .await?;
                dialogue.update(State::ReceiveActivityChoice).await?;
            }
            _ => {
                bot.send_message(
                    msg.chat.id,
                    "The quiz is over! Take it again, or head back to the menu.",
                )
                .reply_markup(quiz_end_keyboard())
                .await?;
            }
        }
        return Ok(());
    }

    let choice = match Choice::parse(text) {
        Some(choice) => choice,
        None => {
            bot.send_message(msg.chat.id, "Please answer with the Yes or No buttons")
                .reply_markup(answer_keyboard())
                .await?;
            return Ok(());
        }
    };

    let mut quiz = quiz;
    quiz.answer(choice);

    // A short beat before the next question so the tap registers
    // visually. It's fine if the chat action doesn't go through
    let _ = bot.send_chat_action(msg.chat.id, ChatAction::Typing).await;
    tokio::time::sleep(quiz::ANSWER_PAUSE).await;

    if let Some(bucket) = quiz.bucket() {
        bot.send_message(msg.chat.id, "Quiz Complete!").await?;
        bot.send_message(msg.chat.id, bucket.message())
            .parse_mode(ParseMode::Html)
            .reply_markup(quiz_end_keyboard())
            .await?;
    } else if let Some(question) = quiz.current() {
        bot.send_message(msg.chat.id, question.text.clone())
            .reply_markup(answer_keyboard())
            .await?;
    }

    dialogue.update(State::SickDayQuiz { quiz }).await?;
    Ok(())
}
