//! Localized message table.
//!
//! Korean is the reference locale; English mirrors it one-to-one. Messages are
//! looked up by code so the UI can re-render a serialized result in another
//! locale without re-running validation.

use super::codes::{ErrorCode, ImprovementTip, WarningCode};
use serde::{Deserialize, Serialize};

/// Language used for user-facing messages.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    Ko,
    En,
}

/// Returns the message for an error code.
pub fn error_message(code: ErrorCode, locale: Locale) -> &'static str {
    use ErrorCode::*;
    match locale {
        Locale::Ko => match code {
            EmailFieldEmpty => "이메일을 입력해주세요",
            EmailTooShort => "이메일은 최소 3자 이상이어야 합니다",
            EmailTooLong => "이메일은 최대 254자까지 가능합니다",
            EmailFormatInvalid => "올바른 이메일 형식이 아닙니다",
            EmailDisposableBlocked => "일회용 이메일은 사용할 수 없습니다",
            EmailDangerousPattern => "보안상 허용되지 않는 문자가 포함되어 있습니다",
            EmailAlreadyExists => "이미 등록된 이메일입니다",
            UsernameRequired => "이메일 또는 사용자명을 입력해주세요",
            PasswordFieldEmpty => "비밀번호를 입력해주세요",
            PasswordTooShort => "비밀번호는 8자 이상이어야 합니다",
            PasswordTooLong => "비밀번호는 최대 128자까지 가능합니다",
            PasswordContainsSpace => "비밀번호에 공백을 포함할 수 없습니다",
            PasswordCharTypesInsufficient => {
                "대문자, 소문자, 숫자, 특수문자 중 최소 3가지를 포함해야 합니다"
            }
            PasswordSequentialPattern => {
                "연속된 문자나 숫자를 4개 이상 사용할 수 없습니다 (예: abcd, 1234)"
            }
            PasswordRepeatedPattern => "같은 문자를 3번 이상 연속으로 사용할 수 없습니다",
            PasswordRepeatedSequence => "같은 문자 조합을 반복해서 사용할 수 없습니다",
            PasswordPersonalInfoIncluded => "비밀번호에 이메일이나 이름이 포함될 수 없습니다",
            PasswordCommonPassword => "너무 일반적이거나 예측 가능한 비밀번호입니다",
            PasswordEntropyTooLow => {
                "비밀번호가 너무 예측 가능합니다. 더 복잡한 조합을 사용하세요"
            }
            PasswordSameAsCurrent => "새 비밀번호는 현재 비밀번호와 달라야 합니다",
            PasswordRequired => "비밀번호를 입력해주세요",
            CurrentPasswordRequired => "현재 비밀번호를 입력해주세요",
            ConfirmPasswordRequired => "비밀번호 확인을 입력해주세요",
            PasswordMismatch => "비밀번호가 일치하지 않습니다",
            NameFieldEmpty => "이름을 입력해주세요",
            NameWhitespaceOnly => "공백만으로는 이름을 만들 수 없습니다",
            NameTooShort => "이름은 최소 2자 이상이어야 합니다",
            NameTooLong => "이름은 최대 50자까지 가능합니다",
            NameInvalidCharacters => "사용할 수 없는 문자가 포함되어 있습니다",
            NameHtmlTags => "HTML 태그는 사용할 수 없습니다",
            NameSqlKeywords => "SQL 키워드는 사용할 수 없습니다",
            NameXssPattern => "보안상 허용되지 않는 패턴이 감지되었습니다",
            NamePathTraversal => "경로 탐색 패턴이 감지되었습니다",
            NameControlChars => "제어 문자는 사용할 수 없습니다",
            NameEmojiNotAllowed => "이모지는 사용할 수 없습니다",
        },
        Locale::En => match code {
            EmailFieldEmpty => "Please enter your email",
            EmailTooShort => "Email must be at least 3 characters",
            EmailTooLong => "Email must be at most 254 characters",
            EmailFormatInvalid => "Email format is invalid",
            EmailDisposableBlocked => "Disposable email addresses are not allowed",
            EmailDangerousPattern => "Email contains characters that are not allowed",
            EmailAlreadyExists => "This email is already registered",
            UsernameRequired => "Please enter your email or username",
            PasswordFieldEmpty => "Please enter a password",
            PasswordTooShort => "Password must be at least 8 characters",
            PasswordTooLong => "Password must be at most 128 characters",
            PasswordContainsSpace => "Password must not contain spaces",
            PasswordCharTypesInsufficient => {
                "Use at least 3 of: uppercase, lowercase, digits, special characters"
            }
            PasswordSequentialPattern => {
                "Password must not contain 4 or more sequential characters (e.g. abcd, 1234)"
            }
            PasswordRepeatedPattern => "Password must not repeat a character 3 or more times",
            PasswordRepeatedSequence => "Password must not repeat the same character group",
            PasswordPersonalInfoIncluded => "Password must not contain your email or name",
            PasswordCommonPassword => "This password is too common or predictable",
            PasswordEntropyTooLow => "Password is too predictable. Use a more complex combination",
            PasswordSameAsCurrent => "New password must differ from the current password",
            PasswordRequired => "Please enter your password",
            CurrentPasswordRequired => "Please enter your current password",
            ConfirmPasswordRequired => "Please confirm your password",
            PasswordMismatch => "Passwords do not match",
            NameFieldEmpty => "Please enter your name",
            NameWhitespaceOnly => "Name cannot consist of spaces only",
            NameTooShort => "Name must be at least 2 characters",
            NameTooLong => "Name must be at most 50 characters",
            NameInvalidCharacters => "Name contains characters that are not allowed",
            NameHtmlTags => "HTML tags are not allowed",
            NameSqlKeywords => "SQL keywords are not allowed",
            NameXssPattern => "A disallowed script pattern was detected",
            NamePathTraversal => "A path traversal pattern was detected",
            NameControlChars => "Control characters are not allowed",
            NameEmojiNotAllowed => "Emojis are not allowed",
        },
    }
}

/// Returns the message and optional suggestion for a warning code.
pub fn warning_message(code: WarningCode, locale: Locale) -> (&'static str, Option<&'static str>) {
    use WarningCode::*;
    match locale {
        Locale::Ko => match code {
            ConsecutiveDots => ("연속된 점이 포함되어 있습니다", Some("표준 이메일 형식을 사용하세요")),
            DotPosition => (
                "점으로 시작하거나 끝나는 이메일입니다",
                Some("표준 이메일 형식을 사용하세요"),
            ),
            ExcessiveSpecialChars => (
                "특수문자가 과도하게 사용되었습니다",
                Some("간단한 이메일 주소를 사용하세요"),
            ),
            NumericOnlyLocal => (
                "숫자로만 구성된 이메일 ID입니다",
                Some("문자를 포함한 이메일 ID를 사용하세요"),
            ),
            PlusAddressing => (
                "Plus addressing이 감지되었습니다",
                Some("기본 이메일 주소를 사용해주세요"),
            ),
            ShortPassword => (
                "비밀번호가 권장 길이보다 짧습니다",
                Some("비밀번호를 더 길게 만들면 보안이 강화됩니다"),
            ),
            KeyboardPattern => (
                "키보드 패턴이 감지되었습니다",
                Some("예측하기 어려운 조합을 사용하세요"),
            ),
            CommonBaseWord => (
                "일반적인 단어가 포함되어 있습니다",
                Some("더 독특한 조합을 사용하세요"),
            ),
            LowEntropy => ("비밀번호 강도가 약합니다", Some("더 복잡한 조합을 사용하세요")),
            MixedLanguages => (
                "여러 언어가 혼합되어 있습니다",
                Some("일관된 언어를 사용하는 것을 권장합니다"),
            ),
            HangulNameTooLong => ("한글 이름이 일반적인 길이를 초과했습니다", None),
            SuspiciousPatterns => (
                "의심스러운 패턴이 감지되었습니다",
                Some("더 일반적인 이름 형식을 사용하세요"),
            ),
        },
        Locale::En => match code {
            ConsecutiveDots => ("Email contains consecutive dots", Some("Use a standard email format")),
            DotPosition => (
                "Email starts or ends with a dot",
                Some("Use a standard email format"),
            ),
            ExcessiveSpecialChars => (
                "Email uses too many special characters",
                Some("Use a simpler email address"),
            ),
            NumericOnlyLocal => (
                "Email ID consists of digits only",
                Some("Use an email ID that contains letters"),
            ),
            PlusAddressing => ("Plus addressing detected", Some("Use your primary email address")),
            ShortPassword => (
                "Password is shorter than recommended",
                Some("A longer password is more secure"),
            ),
            KeyboardPattern => (
                "Keyboard pattern detected",
                Some("Use a less predictable combination"),
            ),
            CommonBaseWord => ("Password contains a common word", Some("Use a more unique combination")),
            LowEntropy => ("Password strength is weak", Some("Use a more complex combination")),
            MixedLanguages => (
                "Name mixes several scripts",
                Some("Using a single script is recommended"),
            ),
            HangulNameTooLong => ("Korean name is longer than usual", None),
            SuspiciousPatterns => (
                "Suspicious pattern detected",
                Some("Use a more conventional name format"),
            ),
        },
    }
}

/// Returns the text for an improvement tip.
pub fn tip_message(tip: ImprovementTip, locale: Locale) -> &'static str {
    match (locale, tip) {
        (Locale::Ko, ImprovementTip::AddUppercase) => "대문자(A-Z)를 포함하면 더 안전합니다",
        (Locale::Ko, ImprovementTip::AddSpecial) => "특수문자(!@#$%^&*)를 포함하면 더 안전합니다",
        (Locale::Ko, ImprovementTip::AddNumbers) => "숫자(0-9)를 포함하면 더 안전합니다",
        (Locale::Ko, ImprovementTip::AddLength) => "비밀번호를 더 길게 만들면 보안이 강화됩니다",
        (Locale::En, ImprovementTip::AddUppercase) => "Adding uppercase letters (A-Z) makes it safer",
        (Locale::En, ImprovementTip::AddSpecial) => {
            "Adding special characters (!@#$%^&*) makes it safer"
        }
        (Locale::En, ImprovementTip::AddNumbers) => "Adding digits (0-9) makes it safer",
        (Locale::En, ImprovementTip::AddLength) => "A longer password is more secure",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_locale_is_korean() {
        assert_eq!(Locale::default(), Locale::Ko);
        assert_eq!(
            error_message(ErrorCode::PasswordMismatch, Locale::default()),
            "비밀번호가 일치하지 않습니다"
        );
    }

    #[test]
    fn test_english_table() {
        assert_eq!(
            error_message(ErrorCode::EmailDisposableBlocked, Locale::En),
            "Disposable email addresses are not allowed"
        );
        let (msg, suggestion) = warning_message(WarningCode::HangulNameTooLong, Locale::En);
        assert!(!msg.is_empty());
        assert!(suggestion.is_none());
    }
}
