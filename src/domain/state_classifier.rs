//! 状态分类器
//!
//! 数值状态码 → 状态标签 → 显示颜色。标签集合在编译期固定，
//! 颜色可以通过配置覆盖，但必须为四个标签都给出颜色。

use std::collections::BTreeMap;

use crate::models::enums::StateLabel;
use crate::utils::error::{AppError, AppResult};

/// 状态码到标签，{0,1,2,3} 以外的值（包括缺失）返回 None，不会报错
pub fn label_of(code: Option<i64>) -> Option<StateLabel> {
    code.and_then(StateLabel::from_code)
}

/// 默认配色，与原看板一致
pub fn default_color(label: StateLabel) -> &'static str {
    match label {
        StateLabel::Normal => "green",
        StateLabel::Attention => "tan",
        StateLabel::Caution => "orange",
        StateLabel::Danger => "red",
    }
}

/// 标签与颜色的绑定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateClassifier {
    palette: [String; 4],
}

impl Default for StateClassifier {
    fn default() -> Self {
        Self {
            palette: StateLabel::ALL.map(|label| default_color(label).to_string()),
        }
    }
}

impl StateClassifier {
    /// 从配置中的 `标签名 -> 颜色` 表构造
    ///
    /// 标签名可以是韩文标签或英文名称。出现未知标签、重复标签、空颜色，
    /// 或者有标签没有颜色时，返回 `ConfigurationError`。
    pub fn from_palette(palette: &BTreeMap<String, String>) -> AppResult<Self> {
        let mut colors: [Option<String>; 4] = Default::default();

        for (name, color) in palette {
            let label = StateLabel::from_name(name).ok_or_else(|| {
                AppError::configuration_error(format!("未知的状态标签: {}", name))
            })?;
            let color = color.trim();
            if color.is_empty() {
                return Err(AppError::configuration_error(format!(
                    "状态标签 {} 的颜色为空",
                    label
                )));
            }
            let slot = &mut colors[label.index()];
            if slot.is_some() {
                return Err(AppError::configuration_error(format!(
                    "状态标签 {} 重复配置了颜色",
                    label
                )));
            }
            *slot = Some(color.to_string());
        }

        let mut resolved: [String; 4] = Default::default();
        for label in StateLabel::ALL {
            resolved[label.index()] = colors[label.index()].take().ok_or_else(|| {
                AppError::configuration_error(format!("状态标签 {} 没有配置颜色", label))
            })?;
        }

        Ok(Self { palette: resolved })
    }

    pub fn color_of(&self, label: StateLabel) -> &str {
        &self.palette[label.index()]
    }

    /// 按标签名查颜色，标签名不在固定集合内属于配置错误
    pub fn color_of_name(&self, name: &str) -> AppResult<&str> {
        StateLabel::from_name(name)
            .map(|label| self.color_of(label))
            .ok_or_else(|| AppError::configuration_error(format!("未知的状态标签: {}", name)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn palette(entries: &[(&str, &str)]) -> BTreeMap<String, String> {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_label_of_is_defined_exactly_for_known_codes() {
        assert_eq!(label_of(Some(0)), Some(StateLabel::Normal));
        assert_eq!(label_of(Some(1)), Some(StateLabel::Attention));
        assert_eq!(label_of(Some(2)), Some(StateLabel::Caution));
        assert_eq!(label_of(Some(3)), Some(StateLabel::Danger));

        for code in [-1, 4, 9, 100, i64::MIN, i64::MAX] {
            assert_eq!(label_of(Some(code)), None, "code {}", code);
        }
        assert_eq!(label_of(None), None);
    }

    #[test]
    fn test_code_label_mapping_is_injective() {
        let codes: Vec<i64> = StateLabel::ALL.iter().map(|l| l.code()).collect();
        assert_eq!(codes, vec![0, 1, 2, 3]);
        for label in StateLabel::ALL {
            assert_eq!(label_of(Some(label.code())), Some(label));
        }
    }

    #[test]
    fn test_default_palette() {
        let classifier = StateClassifier::default();
        assert_eq!(classifier.color_of(StateLabel::Normal), "green");
        assert_eq!(classifier.color_of(StateLabel::Attention), "tan");
        assert_eq!(classifier.color_of(StateLabel::Caution), "orange");
        assert_eq!(classifier.color_of(StateLabel::Danger), "red");
    }

    #[test]
    fn test_palette_accepts_korean_and_english_names() {
        let classifier = StateClassifier::from_palette(&palette(&[
            ("정상", "#00aa00"),
            ("attention", "khaki"),
            ("주의", "darkorange"),
            ("DANGER", "crimson"),
        ]))
        .unwrap();
        assert_eq!(classifier.color_of(StateLabel::Normal), "#00aa00");
        assert_eq!(classifier.color_of(StateLabel::Danger), "crimson");
        assert_eq!(classifier.color_of_name("관심").unwrap(), "khaki");
    }

    #[test]
    fn test_palette_missing_label_is_configuration_error() {
        let err = StateClassifier::from_palette(&palette(&[
            ("정상", "green"),
            ("관심", "tan"),
            ("주의", "orange"),
        ]))
        .unwrap_err();
        assert_eq!(err.error_code(), "CONFIGURATION_ERROR");
        assert!(err.to_string().contains("위험"));
    }

    #[test]
    fn test_palette_unknown_or_duplicate_label_is_configuration_error() {
        let unknown = StateClassifier::from_palette(&palette(&[
            ("정상", "green"),
            ("관심", "tan"),
            ("주의", "orange"),
            ("위험", "red"),
            ("고장", "black"),
        ]));
        assert_eq!(unknown.unwrap_err().error_code(), "CONFIGURATION_ERROR");

        let duplicate = StateClassifier::from_palette(&palette(&[
            ("정상", "green"),
            ("normal", "lime"),
            ("관심", "tan"),
            ("주의", "orange"),
            ("위험", "red"),
        ]));
        assert_eq!(duplicate.unwrap_err().error_code(), "CONFIGURATION_ERROR");
    }

    #[test]
    fn test_color_of_unknown_name_is_configuration_error() {
        let classifier = StateClassifier::default();
        let err = classifier.color_of_name("존재하지 않는 상태").unwrap_err();
        assert_eq!(err.error_code(), "CONFIGURATION_ERROR");
    }
}
