use std::path::PathBuf;

use clap::{ArgGroup, Parser};

use rust_gradebook::runtime::InputSource;

/// 按学生汇总作业组成绩
#[derive(Debug, Parser)]
#[command(name = "rust-gradebook", version, about)]
#[command(group(
    ArgGroup::new("source")
        .required(true)
        .args(["input", "course"])
))]
pub struct Cli {
    /// 包含 course、assignment_group、learner_submissions 的 JSON 文档
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// 课程 JSON 文件
    #[arg(long, requires_all = ["group", "submissions"])]
    pub course: Option<PathBuf>,

    /// 作业组 JSON 文件
    #[arg(long, requires = "course")]
    pub group: Option<PathBuf>,

    /// 提交记录 JSON 文件
    #[arg(long, requires = "course")]
    pub submissions: Option<PathBuf>,

    /// 评估时间（RFC 3339），默认读取配置或当前时间
    #[arg(long, env = "GRADEBOOK_NOW")]
    pub now: Option<String>,

    /// 单行输出 JSON
    #[arg(long)]
    pub compact: bool,
}

impl Cli {
    pub fn source(&self) -> Option<InputSource> {
        if let Some(input) = &self.input {
            return Some(InputSource::Bundle(input.clone()));
        }
        match (&self.course, &self.group, &self.submissions) {
            (Some(course), Some(group), Some(submissions)) => Some(InputSource::Separate {
                course: course.clone(),
                group: group.clone(),
                submissions: submissions.clone(),
            }),
            _ => None,
        }
    }
}
