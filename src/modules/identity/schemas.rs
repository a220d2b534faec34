use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenType {
    Bearer,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Token {
    pub access_token: String,
    pub token_type: TokenType,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Msg {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_type_serializes_lowercase() {
        assert_eq!(serde_json::to_value(TokenType::Bearer).unwrap(), "bearer");
    }

    #[test]
    fn token_response_shape() {
        let token = Token {
            access_token: "abc".to_string(),
            token_type: TokenType::Bearer,
        };
        let value = serde_json::to_value(&token).unwrap();
        assert_eq!(value["access_token"], "abc");
        assert_eq!(value["token_type"], "bearer");
    }
}
