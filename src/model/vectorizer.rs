use serde::{Deserialize, Serialize};
use validator::Validate;
use crate::error::AppResult;

/// 矢量化引擎的完整配置，序列化为 camelCase JSON 传给引擎
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VectorizerConfig {
    pub color_mode: ColorMode,
    pub color_precision: u32,
    pub filter_speckle: u32,
    pub splice_threshold: u32,
    pub corner_threshold: u32,
    pub hierarchical: Hierarchical,
    pub mode: PathMode,
    pub layer_difference: u32,
    pub length_threshold: f64,
    pub max_iterations: u32,
    pub path_precision: u32,
}

impl Default for VectorizerConfig {
    fn default() -> Self {
        Self {
            color_mode: ColorMode::Color,
            color_precision: 8,
            filter_speckle: 4,
            splice_threshold: 45,
            corner_threshold: 60,
            hierarchical: Hierarchical::Stacked,
            mode: PathMode::Spline,
            layer_difference: 6,
            length_threshold: 4.0,
            max_iterations: 2,
            path_precision: 5,
        }
    }
}

impl VectorizerConfig {
    /// 合并用户覆盖项：先校验边界，再逐字段应用，未指定的字段保持默认值
    pub fn merged(overrides: Option<&VectorizerOverrides>) -> AppResult<Self> {
        let mut config = Self::default();
        if let Some(overrides) = overrides {
            overrides.validate()?;
            config.apply(overrides);
        }
        Ok(config)
    }

    fn apply(&mut self, o: &VectorizerOverrides) {
        if let Some(v) = o.color_mode {
            self.color_mode = v;
        }
        if let Some(v) = o.color_precision {
            self.color_precision = v;
        }
        if let Some(v) = o.filter_speckle {
            self.filter_speckle = v;
        }
        if let Some(v) = o.splice_threshold {
            self.splice_threshold = v;
        }
        if let Some(v) = o.corner_threshold {
            self.corner_threshold = v;
        }
        if let Some(v) = o.hierarchical {
            self.hierarchical = v;
        }
        if let Some(v) = o.mode {
            self.mode = v;
        }
        if let Some(v) = o.layer_difference {
            self.layer_difference = v;
        }
        if let Some(v) = o.length_threshold {
            self.length_threshold = v;
        }
        if let Some(v) = o.max_iterations {
            self.max_iterations = v;
        }
        if let Some(v) = o.path_precision {
            self.path_precision = v;
        }
    }
}

/// 用户提交的部分覆盖项，缺省字段不参与合并
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct VectorizerOverrides {
    pub color_mode: Option<ColorMode>,
    #[validate(range(min = 1, max = 8))]
    pub color_precision: Option<u32>,
    pub filter_speckle: Option<u32>,
    #[validate(range(min = 0, max = 180))]
    pub splice_threshold: Option<u32>,
    #[validate(range(min = 0, max = 180))]
    pub corner_threshold: Option<u32>,
    pub hierarchical: Option<Hierarchical>,
    pub mode: Option<PathMode>,
    pub layer_difference: Option<u32>,
    #[validate(range(min = 0.0))]
    pub length_threshold: Option<f64>,
    #[validate(range(min = 1))]
    pub max_iterations: Option<u32>,
    #[validate(range(min = 1))]
    pub path_precision: Option<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    Color,
    Binary,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Hierarchical {
    Stacked,
    Cutout,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PathMode {
    None,
    Polygon,
    Spline,
}
