use std::{fmt, str::FromStr};

use crate::error::ConfigError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationKind {
    Get,
    Replace,
    Add,
    Remove,
    Move,
    Test,
}

impl OperationKind {
    pub const ALL: [OperationKind; 6] = [
        OperationKind::Get,
        OperationKind::Replace,
        OperationKind::Add,
        OperationKind::Remove,
        OperationKind::Move,
        OperationKind::Test,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            OperationKind::Get => "get",
            OperationKind::Replace => "replace",
            OperationKind::Add => "add",
            OperationKind::Remove => "remove",
            OperationKind::Move => "move",
            OperationKind::Test => "test",
        }
    }

    /// Whether the operation is sent to the server as a PATCH.
    pub fn is_mutating(self) -> bool {
        self != OperationKind::Get
    }

    pub fn requires_value(self) -> bool {
        matches!(
            self,
            OperationKind::Replace | OperationKind::Add | OperationKind::Test
        )
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Case-insensitive; surrounding whitespace is not accepted.
impl FromStr for OperationKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_lowercase();
        OperationKind::ALL
            .into_iter()
            .find(|k| k.as_str() == lower)
            .ok_or_else(|| ConfigError::UnsupportedOperation(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_case_insensitively() {
        assert_eq!("Replace".parse::<OperationKind>().unwrap(), OperationKind::Replace);
        assert_eq!("MOVE".parse::<OperationKind>().unwrap(), OperationKind::Move);
        assert_eq!("get".parse::<OperationKind>().unwrap(), OperationKind::Get);
    }

    #[test]
    fn rejects_unknown_operations() {
        for s in ["copy", "", " add", "replace|add"] {
            match s.parse::<OperationKind>() {
                Err(ConfigError::UnsupportedOperation(got)) => assert_eq!(got, s),
                other => panic!("expected UnsupportedOperation for {:?}, got {:?}", s, other),
            }
        }
    }

    #[test]
    fn only_get_is_read_only() {
        for k in OperationKind::ALL {
            assert_eq!(k.is_mutating(), k != OperationKind::Get);
        }
    }

    #[test]
    fn value_requirements() {
        assert!(OperationKind::Replace.requires_value());
        assert!(OperationKind::Add.requires_value());
        assert!(OperationKind::Test.requires_value());
        assert!(!OperationKind::Remove.requires_value());
        assert!(!OperationKind::Move.requires_value());
        assert!(!OperationKind::Get.requires_value());
    }
}
