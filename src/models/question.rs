use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Every question carries exactly this many options.
pub const OPTION_COUNT: usize = 4;

const OPTION_LABELS: [char; OPTION_COUNT] = ['A', 'B', 'C', 'D'];

/// Letter shown next to the option at `index`.
pub fn option_label(index: usize) -> char {
    OPTION_LABELS.get(index).copied().unwrap_or('?')
}

/// A question as served to test takers, without the answer key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: i64,
    pub question_text: String,
    pub options: [String; OPTION_COUNT],
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A question together with the index of its correct option.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionWithAnswer {
    #[serde(flatten)]
    pub question: Question,
    pub correct_answer: usize,
}

impl QuestionWithAnswer {
    pub fn id(&self) -> i64 {
        self.question.id
    }

    /// Whether the option at `index` is the answer key.
    pub fn is_correct_option(&self, index: usize) -> bool {
        index == self.correct_answer
    }

    /// Editable copy of this record.
    pub fn to_draft(&self) -> QuestionDraft {
        QuestionDraft {
            question_text: self.question.question_text.clone(),
            options: self.question.options.clone(),
            correct_answer: self.correct_answer,
        }
    }
}

/// Body of a create request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionDraft {
    pub question_text: String,
    pub options: [String; OPTION_COUNT],
    pub correct_answer: usize,
}

impl Default for QuestionDraft {
    fn default() -> Self {
        Self {
            question_text: String::new(),
            options: Default::default(),
            correct_answer: 0,
        }
    }
}

/// Partial update: absent fields are left untouched by the server and
/// omitted from the request body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub question_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<[String; OPTION_COUNT]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub correct_answer: Option<usize>,
}

impl QuestionUpdate {
    /// Fields of `draft` that differ from `existing`.
    pub fn between(existing: &QuestionWithAnswer, draft: &QuestionDraft) -> Self {
        let current = &existing.question;
        Self {
            question_text: (current.question_text != draft.question_text)
                .then(|| draft.question_text.clone()),
            options: (current.options != draft.options).then(|| draft.options.clone()),
            correct_answer: (existing.correct_answer != draft.correct_answer)
                .then_some(draft.correct_answer),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.question_text.is_none() && self.options.is_none() && self.correct_answer.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> QuestionWithAnswer {
        serde_json::from_str(
            r#"{
                "id": 5,
                "questionText": "Pick C",
                "options": ["A", "B", "C", "D"],
                "correctAnswer": 2,
                "createdAt": "2024-03-01T10:00:00Z",
                "updatedAt": "2024-03-02T10:00:00Z"
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_deserialize_camel_case_record() {
        let question = sample();
        assert_eq!(question.id(), 5);
        assert_eq!(question.question.options, ["A", "B", "C", "D"]);
        assert_eq!(question.correct_answer, 2);
        assert!(question.is_correct_option(2));
        assert!(!question.is_correct_option(0));
    }

    #[test]
    fn test_test_question_has_no_answer_key() {
        let json = serde_json::to_string(&sample().question).unwrap();
        assert!(json.contains("\"questionText\""));
        assert!(!json.contains("correctAnswer"));
    }

    #[test]
    fn test_rejects_wrong_option_count() {
        let result: Result<Question, _> = serde_json::from_str(
            r#"{"id":1,"questionText":"q","options":["A","B","C"],
                "createdAt":"2024-03-01T10:00:00Z","updatedAt":"2024-03-01T10:00:00Z"}"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_update_between_only_changed_fields() {
        let existing = sample();
        let mut draft = existing.to_draft();
        draft.correct_answer = 1;

        let update = QuestionUpdate::between(&existing, &draft);
        assert_eq!(update.correct_answer, Some(1));
        assert!(update.question_text.is_none());
        assert!(update.options.is_none());

        let json = serde_json::to_string(&update).unwrap();
        assert_eq!(json, r#"{"correctAnswer":1}"#);
    }

    #[test]
    fn test_update_between_unchanged_is_empty() {
        let existing = sample();
        let update = QuestionUpdate::between(&existing, &existing.to_draft());
        assert!(update.is_empty());
        assert_eq!(serde_json::to_string(&update).unwrap(), "{}");
    }

    #[test]
    fn test_option_label() {
        assert_eq!(option_label(0), 'A');
        assert_eq!(option_label(3), 'D');
        assert_eq!(option_label(4), '?');
    }
}
