//! 客户端设置
//!
//! 提供设置数据结构、JSON 持久化和 Bevy Resource 集成

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use protocol::DEFAULT_PORT;

/// 设置插件
pub struct SettingsPlugin;

impl Plugin for SettingsPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(GameSettings::load());
    }
}

/// 客户端设置
#[derive(Resource, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameSettings {
    /// 规则服务地址
    pub server_addr: String,
    /// 是否按数组原序渲染（row 0 为第 1 横排）
    pub flipped: bool,
    /// 是否显示合法目标高亮
    pub show_targets: bool,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            server_addr: format!("127.0.0.1:{DEFAULT_PORT}"),
            flipped: false,
            show_targets: true,
        }
    }
}

impl GameSettings {
    /// 设置文件路径
    fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("board-client").join("settings.json"))
    }

    /// 从设置文件加载，缺失或损坏时回退默认值
    pub fn load() -> Self {
        let Some(path) = Self::config_path() else {
            return Self::default();
        };

        match std::fs::read_to_string(&path) {
            Ok(text) => match serde_json::from_str(&text) {
                Ok(settings) => settings,
                Err(e) => {
                    tracing::warn!("Invalid settings file {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(_) => Self::default(),
        }
    }

    /// 保存到设置文件
    pub fn save(&self) -> anyhow::Result<()> {
        let Some(path) = Self::config_path() else {
            anyhow::bail!("no config directory available");
        };
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }
}
