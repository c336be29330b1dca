//! Gradebook - 课程作业成绩汇总
//!
//! 按学生汇总作业组内各作业的百分制得分与加权平均分。
//!
//! # 架构
//! - `config`: 配置管理
//! - `errors`: 统一错误处理
//! - `models`: 数据模型定义
//! - `runtime`: 单次运行流程（加载、汇总、输出）
//! - `services`: 业务逻辑层（成绩汇总、输入导入）
//! - `utils`: 工具函数

pub mod config;
pub mod errors;
pub mod models;
pub mod runtime;
pub mod services;
pub mod utils;
