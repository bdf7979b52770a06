use serde::{Deserialize, Serialize};

/// Score returned by the server for a submitted test.
///
/// `percentage` is computed and rounded server side; the client only
/// displays it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestResult {
    pub score: u32,
    pub total: u32,
    pub percentage: u32,
}

impl TestResult {
    pub fn incorrect(&self) -> u32 {
        self.total.saturating_sub(self.score)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_incorrect_count() {
        let result = TestResult {
            score: 7,
            total: 10,
            percentage: 70,
        };
        assert_eq!(result.incorrect(), 3);
    }

    #[test]
    fn test_deserialize_server_body() {
        let result: TestResult =
            serde_json::from_str(r#"{"score":9,"percentage":90,"total":10}"#).unwrap();
        assert_eq!(result.score, 9);
        assert_eq!(result.total, 10);
        assert_eq!(result.percentage, 90);
    }
}
