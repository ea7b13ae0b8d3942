use anyhow::Result;
use std::{env, path::PathBuf};

#[derive(Clone)]
pub struct Paths {
    pub config: PathBuf,
    pub log: PathBuf,
}

/// Resolve the gct home directory.
///
/// `$XDG_CONFIG_HOME/gct` when set, otherwise `$HOME/.config/gct`.
pub fn gct_home() -> Result<PathBuf> {
    let xdg = env::var_os("XDG_CONFIG_HOME");
    let base = xdg
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(env::var_os("HOME").unwrap_or_default()).join(".config"));
    Ok(base.join("gct"))
}

/// Files under [`gct_home`]: `config.toml` and the `gct.log` command log.
pub fn paths() -> Result<Paths> {
    let home = gct_home()?;
    Ok(Paths {
        config: home.join("config.toml"),
        log: home.join("gct.log"),
    })
}
