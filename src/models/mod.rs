mod question;
mod result;

pub use question::{
    option_label, Question, QuestionDraft, QuestionUpdate, QuestionWithAnswer, OPTION_COUNT,
};
pub use result::TestResult;
