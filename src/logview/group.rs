use super::parse::LogLine;

/// One inbound-request-to-outbound-response cycle, reassembled from
/// consecutive trace lines.
#[derive(Debug, Clone)]
pub struct Transaction {
    /// Timestamp of the opening `INCOMING REQUEST` line.
    pub timestamp: String,
    /// Request kind, e.g. `POST /v1/chat/completions`.
    pub kind: String,
    /// Every line belonging to this transaction, opener included.
    pub details: Vec<LogLine>,
}

impl Transaction {
    pub fn has_error(&self) -> bool {
        self.details
            .iter()
            .any(|line| line.level == "ERROR" || line.message.starts_with("ERROR"))
    }
}

/// Group parsed lines into transactions.
///
/// A line whose message begins with `INCOMING REQUEST` closes the open
/// transaction and starts a new one; every line, opener included, lands in
/// the open transaction's details. Lines arriving before the first opener
/// belong to no transaction and are dropped. The final open transaction is
/// emitted at end of input.
pub fn group_transactions<I>(lines: I) -> Vec<Transaction>
where
    I: IntoIterator<Item = LogLine>,
{
    let mut transactions = Vec::new();
    let mut current: Option<Transaction> = None;

    for line in lines {
        if line.message.starts_with("INCOMING REQUEST") {
            if let Some(done) = current.take() {
                transactions.push(done);
            }
            current = Some(Transaction {
                timestamp: line.timestamp.clone(),
                kind: line.message.split(" - ").nth(1).unwrap_or("").to_string(),
                details: Vec::new(),
            });
        }
        if let Some(transaction) = current.as_mut() {
            transaction.details.push(line);
        }
    }

    if let Some(done) = current {
        transactions.push(done);
    }
    transactions
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(level: &str, message: &str) -> LogLine {
        LogLine {
            timestamp: "2024-05-02 09:15:42,001".to_string(),
            level: level.to_string(),
            message: message.to_string(),
        }
    }

    #[test]
    fn two_openers_produce_two_transactions_with_their_own_details() {
        let lines = vec![
            line("DEBUG", "INCOMING REQUEST - POST /v1/chat/completions"),
            line("DEBUG", "Request Body: {\"a\":1}"),
            line("DEBUG", "Response Body: {}"),
            line("DEBUG", "INCOMING REQUEST - POST /v1/completions"),
            line("DEBUG", "Request Body: {\"b\":2}"),
        ];
        let transactions = group_transactions(lines);
        assert_eq!(transactions.len(), 2);

        assert_eq!(transactions[0].kind, "POST /v1/chat/completions");
        assert_eq!(transactions[0].details.len(), 3);
        assert!(transactions[0]
            .details
            .iter()
            .all(|l| !l.message.contains("\"b\"")));

        assert_eq!(transactions[1].kind, "POST /v1/completions");
        assert_eq!(transactions[1].details.len(), 2);
    }

    #[test]
    fn opener_is_included_in_its_own_details() {
        let transactions =
            group_transactions(vec![line("DEBUG", "INCOMING REQUEST - POST /v1/embeddings")]);
        assert_eq!(transactions.len(), 1);
        assert_eq!(transactions[0].details.len(), 1);
    }

    #[test]
    fn lines_before_the_first_opener_are_dropped() {
        let transactions = group_transactions(vec![
            line("INFO", "Detailed request logging enabled to console output"),
            line("DEBUG", "INCOMING REQUEST - POST /v1/completions"),
        ]);
        assert_eq!(transactions.len(), 1);
        assert_eq!(transactions[0].details.len(), 1);
    }

    #[test]
    fn error_detection_checks_level_and_message_prefix() {
        let mut transactions = group_transactions(vec![
            line("DEBUG", "INCOMING REQUEST - POST /v1/chat/completions"),
            line("ERROR", "Error Response Body: upstream said no"),
        ]);
        assert!(transactions.pop().unwrap().has_error());

        let clean = group_transactions(vec![
            line("DEBUG", "INCOMING REQUEST - POST /v1/chat/completions"),
            line("DEBUG", "Response Body: {}"),
        ]);
        assert!(!clean[0].has_error());
    }
}
