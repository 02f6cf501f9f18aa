use crate::catalog::CatalogError;
use crate::cli::ColorMode;
use crate::domain::models::{ErrorBody, JsonErr, JsonOut};
use crate::services::resolver::{CollectError, ResolveError};
use crate::services::storage::CheckpointError;
use serde::Serialize;
use std::io::IsTerminal;

pub fn print_out<T: Serialize>(
    json: bool,
    data: &[T],
    row: impl Fn(&T) -> String,
) -> anyhow::Result<()> {
    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&JsonOut { ok: true, data })?
        );
    } else {
        for d in data {
            println!("{}", row(d));
        }
    }
    Ok(())
}

pub fn print_one<T: Serialize>(
    json: bool,
    data: T,
    row: impl Fn(&T) -> String,
) -> anyhow::Result<()> {
    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&JsonOut { ok: true, data })?
        );
    } else {
        println!("{}", row(&data));
    }
    Ok(())
}

/// Stable machine-readable code for a top-level failure.
pub fn error_code(err: &anyhow::Error) -> &'static str {
    if let Some(e) = err.downcast_ref::<CheckpointError>() {
        return match e {
            CheckpointError::NotFound(_) => "CHECKPOINT_NOT_FOUND",
            CheckpointError::Corrupted { .. } => "CHECKPOINT_CORRUPT",
            CheckpointError::Incompatible { .. } => "CHECKPOINT_INCOMPATIBLE",
        };
    }
    if let Some(CollectError::Aborted) = err.downcast_ref::<CollectError>() {
        return "ABORTED";
    }
    if err.downcast_ref::<CatalogError>().is_some() {
        return "CATALOG_INVALID";
    }
    if err.downcast_ref::<ResolveError>().is_some() {
        return "INVALID_ANSWER";
    }
    "INTERNAL"
}

pub fn print_error(json: bool, err: &anyhow::Error) {
    if json {
        let body = JsonErr {
            ok: false,
            error: ErrorBody {
                code: error_code(err).to_string(),
                message: format!("{:#}", err),
            },
        };
        match serde_json::to_string_pretty(&body) {
            Ok(s) => println!("{}", s),
            Err(_) => eprintln!("error: {:#}", err),
        }
    } else {
        eprintln!("error: {:#}", err);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Style {
    Bold,
    Dim,
    Heading,
    Accent,
    Good,
    Warn,
    Bad,
}

/// ANSI styling decided once at startup and handed to whatever renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub use_color: bool,
}

impl Palette {
    pub fn new(use_color: bool) -> Self {
        Self { use_color }
    }

    pub fn plain() -> Self {
        Self::new(false)
    }

    pub fn for_mode(mode: ColorMode) -> Self {
        match mode {
            ColorMode::Always => Self::new(true),
            ColorMode::Never => Self::plain(),
            ColorMode::Auto => Self::new(std::io::stdout().is_terminal()),
        }
    }

    fn code(style: Style) -> &'static str {
        match style {
            Style::Bold => "\x1b[1m",
            Style::Dim => "\x1b[2m",
            Style::Heading => "\x1b[1m\x1b[96m",
            Style::Accent => "\x1b[96m",
            Style::Good => "\x1b[92m",
            Style::Warn => "\x1b[93m",
            Style::Bad => "\x1b[91m",
        }
    }

    pub fn paint(&self, text: &str, style: Style) -> String {
        if self.use_color {
            format!("{}{}\x1b[0m", Self::code(style), text)
        } else {
            text.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_palette_leaves_text_alone() {
        assert_eq!(Palette::plain().paint("Q1:", Style::Heading), "Q1:");
    }

    #[test]
    fn colored_palette_wraps_and_resets() {
        let s = Palette::new(true).paint("NO", Style::Good);
        assert!(s.starts_with("\x1b[92m"));
        assert!(s.ends_with("NO\x1b[0m"));
    }

    #[test]
    fn error_codes_follow_error_type() {
        let aborted: anyhow::Error = CollectError::Aborted.into();
        assert_eq!(error_code(&aborted), "ABORTED");
        let corrupt: anyhow::Error = CheckpointError::Incompatible {
            path: "x.json".into(),
            reason: "format".into(),
        }
        .into();
        assert_eq!(error_code(&corrupt), "CHECKPOINT_INCOMPATIBLE");
        assert_eq!(error_code(&anyhow::anyhow!("boom")), "INTERNAL");
    }
}
