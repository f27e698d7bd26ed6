//! ロールルーティング
//!
//! ログイン時に選択したロールをワークフローの入口画面に対応付ける。

use serde::{Deserialize, Serialize};

/// 利用者ロール
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Institution,
    Employer,
    Student,
    Admin,
}

impl Role {
    pub const ALL: [Role; 4] = [
        Role::Institution,
        Role::Employer,
        Role::Student,
        Role::Admin,
    ];

    /// ロールごとの入口画面
    pub fn entry_screen(&self) -> Screen {
        match self {
            Role::Institution => Screen::Dashboard,
            Role::Employer => Screen::Verify,
            Role::Student => Screen::Extract,
            Role::Admin => Screen::Upload,
        }
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "institution" => Ok(Role::Institution),
            "employer" => Ok(Role::Employer),
            "student" => Ok(Role::Student),
            "admin" => Ok(Role::Admin),
            _ => Err(format!(
                "Unknown role: {}. Use institution, employer, student, or admin",
                s
            )),
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Institution => write!(f, "institution"),
            Role::Employer => write!(f, "employer"),
            Role::Student => write!(f, "student"),
            Role::Admin => write!(f, "admin"),
        }
    }
}

/// ワークフロー画面
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Dashboard,
    Upload,
    Extract,
    Verify,
}

impl Screen {
    /// ロール未選択（既定ログイン）の入口
    pub fn default_entry() -> Self {
        Screen::Dashboard
    }
}

impl std::fmt::Display for Screen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Screen::Dashboard => write!(f, "ダッシュボード"),
            Screen::Upload => write!(f, "アップロード"),
            Screen::Extract => write!(f, "データ抽出"),
            Screen::Verify => write!(f, "検証結果"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_screen_mapping() {
        assert_eq!(Role::Institution.entry_screen(), Screen::Dashboard);
        assert_eq!(Role::Employer.entry_screen(), Screen::Verify);
        assert_eq!(Role::Student.entry_screen(), Screen::Extract);
        assert_eq!(Role::Admin.entry_screen(), Screen::Upload);
    }

    #[test]
    fn test_default_entry_is_dashboard() {
        assert_eq!(Screen::default_entry(), Screen::Dashboard);
    }

    #[test]
    fn test_role_from_str() {
        assert_eq!("institution".parse::<Role>().unwrap(), Role::Institution);
        assert_eq!("ADMIN".parse::<Role>().unwrap(), Role::Admin);
        assert!("verifier".parse::<Role>().is_err());
    }

    #[test]
    fn test_role_display_roundtrip() {
        for role in Role::ALL {
            let parsed: Role = role.to_string().parse().unwrap();
            assert_eq!(parsed, role);
        }
    }
}
