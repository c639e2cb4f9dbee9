use anyhow::{Context, Result, bail};
use std::path::{Path, PathBuf};

#[derive(Debug, Default)]
struct RcConfig {
    url: Option<String>,
    key: Option<String>,
}

#[derive(Debug, Clone)]
pub(crate) struct ResolvedConfig {
    /// Endpoint override; `None` means the built-in endpoint.
    pub(crate) url: Option<String>,
    pub(crate) key: String,
}

/// Resolves the API key (and an optional endpoint override) from, in
/// order of precedence:
/// - environment variables `SNAKE_QUERY_API_KEY` / `SNAKE_QUERY_URL`
/// - an rc file: `SNAKE_QUERY_RC` if set, else `./.snakequeryrc`,
///   else `~/.snakequeryrc`
pub(crate) fn load_config() -> Result<ResolvedConfig> {
    let mut url = std::env::var("SNAKE_QUERY_URL").ok();
    let mut key = std::env::var("SNAKE_QUERY_API_KEY").ok();

    let rc_candidates = rc_candidates();

    if key.is_none() || url.is_none() {
        for rc_path in &rc_candidates {
            if rc_path.exists() {
                let cfg = read_rc(rc_path).with_context(|| {
                    format!("failed to read configuration file {}", rc_path.display())
                })?;

                if url.is_none() {
                    url = cfg.url;
                }
                if key.is_none() {
                    key = cfg.key;
                }
                break;
            }
        }
    }

    let key = match key {
        Some(v) if !v.is_empty() => v,
        _ => {
            if !rc_candidates.is_empty() {
                bail!(
                    "Missing configuration: key (set SNAKE_QUERY_API_KEY or put `key:` in one of: {})",
                    rc_candidates
                        .iter()
                        .map(|p| p.display().to_string())
                        .collect::<Vec<_>>()
                        .join(", ")
                );
            }
            bail!("Missing configuration: key (set SNAKE_QUERY_API_KEY or create .snakequeryrc)");
        }
    };

    Ok(ResolvedConfig { url, key })
}

fn read_rc(path: &Path) -> Result<RcConfig> {
    let text = std::fs::read_to_string(path)?;
    let mut cfg = RcConfig::default();

    for raw in text.lines() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if let Some((k, v)) = line.split_once(':') {
            let k = k.trim();
            let v = strip_quotes(v.trim());
            if v.is_empty() {
                continue;
            }
            match k {
                "url" => cfg.url = Some(v.to_string()),
                "key" => cfg.key = Some(v.to_string()),
                _ => {}
            }
        }
    }

    Ok(cfg)
}

fn strip_quotes(s: &str) -> &str {
    let s = s.trim();
    if (s.starts_with('"') && s.ends_with('"') && s.len() >= 2)
        || (s.starts_with('\'') && s.ends_with('\'') && s.len() >= 2)
    {
        &s[1..s.len() - 1]
    } else {
        s
    }
}

fn rc_candidates() -> Vec<PathBuf> {
    // Search order:
    // 1) SNAKE_QUERY_RC (explicit)
    // 2) ./.snakequeryrc (current working directory)
    // 3) ~/.snakequeryrc
    if let Ok(p) = std::env::var("SNAKE_QUERY_RC") {
        return vec![PathBuf::from(p)];
    }

    let mut v = Vec::new();
    if let Ok(cwd) = std::env::current_dir() {
        v.push(cwd.join(".snakequeryrc"));
    }
    if let Some(home) = dirs::home_dir() {
        v.push(home.join(".snakequeryrc"));
    }
    v
}
