//! Pulling code out of chat replies.

/// Contents of the first fenced code block in `reply`.
///
/// Replies without a fence are returned unchanged. An unterminated fence
/// yields everything after the opening line.
pub fn extract_code_block(reply: &str) -> String {
    let mut in_block = false;
    let mut found = false;
    let mut code = String::new();

    for line in reply.lines() {
        if line.trim_start().starts_with("```") {
            if in_block {
                return code;
            }
            in_block = true;
            found = true;
        } else if in_block {
            code.push_str(line);
            code.push('\n');
        }
    }

    if found {
        code
    } else {
        reply.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_reply_untouched() {
        assert_eq!(extract_code_block("x = 1"), "x = 1");
    }

    #[test]
    fn test_first_block_wins() {
        let reply = "Here you go:\n```python\ndef run_task(n):\n    return []\n```\nand\n```\nother\n```";
        assert_eq!(extract_code_block(reply), "def run_task(n):\n    return []\n");
    }

    #[test]
    fn test_unterminated_block() {
        assert_eq!(extract_code_block("```py\na = 1\nb = 2"), "a = 1\nb = 2\n");
    }
}
