use std::str::FromStr;

/// A yes/no answer typed at a confirmation prompt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UserBool {
    pub value: bool,
}

impl UserBool {
    pub const NO: UserBool = UserBool { value: false };
}

impl From<UserBool> for bool {
    fn from(answer: UserBool) -> Self {
        answer.value
    }
}

impl FromStr for UserBool {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = match s.trim().to_lowercase().as_str() {
            "y" | "yes" | "true" => true,
            "n" | "no" | "false" => false,
            other => return Err(format!("Please answer y or n, not '{}'.", other)),
        };
        Ok(UserBool { value })
    }
}
