use handle_errors::Error;
use serde::{Deserialize, Serialize};

use crate::types::scope::Scope;

#[derive(Serialize, Debug, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: QuestionId,
    #[serde(default)]
    pub state_id: Scope,
    pub category: String,
    pub question: String,
    pub options: Vec<String>,
    pub correct_answer: String,
    pub explanation: Option<String>,
}

#[derive(Serialize, Debug, Clone, Copy, Eq, Hash, Deserialize, PartialEq, PartialOrd, Ord)]
pub struct QuestionId(pub i32);

#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct NewQuestion {
    #[serde(default)]
    pub state_id: Scope,
    pub category: String,
    pub question: String,
    pub options: Vec<String>,
    pub correct_answer: String,
    pub explanation: Option<String>,
}

impl NewQuestion {
    /// The correct answer has to be one of the offered options.
    pub fn validate(&self) -> Result<(), Error> {
        if self.options.iter().any(|o| o == &self.correct_answer) {
            Ok(())
        } else {
            Err(Error::InvalidQuestion(format!(
                "correct answer {:?} is not one of the options",
                self.correct_answer
            )))
        }
    }
}

impl Question {
    pub fn is_correct(&self, choice: &str) -> bool {
        self.correct_answer == choice
    }
}
