//! zmenu - 无障碍菜单按钮组件库
//!
//! 模块结构：
//! - core: 核心定义（KeyCode, MenuConfig, MenuError）
//! - dom: 宿主文档模型（元素树、焦点、事件监听）
//! - widgets: 组件层（Menu, MenuButton, CloseTimer）
//! - runtime: 运行时（Page，负责事件分发与定时器）
//! - tui: 终端演示前端（需启用 `tui` feature）

pub mod core;
pub mod dom;
pub mod runtime;
pub mod widgets;

#[cfg(feature = "tui")]
pub mod tui;
