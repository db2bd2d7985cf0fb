use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::error::{Error, IoResultExt, Result};
use crate::hash::Hash;

const HEAD_CONTENTS: &str = "ref: refs/heads/main\n";
const DESCRIPTION_CONTENTS: &str =
    "Unnamed repository; edit this file 'description' to name the repository.\n";

/// a silt repository: an explicit handle on one `.git` directory
///
/// every store operation takes `&Repo` so there is no ambient
/// working-directory state to get wrong.
pub struct Repo {
    git_dir: PathBuf,
    config: Config,
}

impl Repo {
    /// initialize a repository skeleton under `<work_dir>/.git`
    pub fn init(work_dir: &Path) -> Result<Self> {
        let git_dir = work_dir.join(".git");
        if git_dir.exists() {
            return Err(Error::RepoExists(git_dir));
        }

        // create directory structure
        for dir in ["objects", "refs/heads", "refs/tags", "hooks", "info"] {
            std::fs::create_dir_all(git_dir.join(dir)).with_path(&git_dir)?;
        }

        std::fs::write(git_dir.join("HEAD"), HEAD_CONTENTS).with_path(git_dir.join("HEAD"))?;
        std::fs::write(git_dir.join("description"), DESCRIPTION_CONTENTS)
            .with_path(git_dir.join("description"))?;

        let config = Config::default();
        config.save(&git_dir.join("config"))?;

        Ok(Self { git_dir, config })
    }

    /// open an existing repository rooted at `work_dir`
    pub fn open(work_dir: &Path) -> Result<Self> {
        let git_dir = work_dir.join(".git");
        if !git_dir.join("objects").is_dir() {
            return Err(Error::NoRepo(git_dir));
        }

        let config = Config::load(&git_dir.join("config"))?;

        Ok(Self { git_dir, config })
    }

    /// repository `.git` directory
    pub fn git_dir(&self) -> &Path {
        &self.git_dir
    }

    /// repository configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// path to the config file
    pub fn config_path(&self) -> PathBuf {
        self.git_dir.join("config")
    }

    /// path to the HEAD file
    pub fn head_path(&self) -> PathBuf {
        self.git_dir.join("HEAD")
    }

    /// path to the objects directory (the store root)
    pub fn objects_path(&self) -> PathBuf {
        self.git_dir.join("objects")
    }

    /// fan-out path of a stored object: `objects/<hex[0..2]>/<hex[2..]>`
    pub fn object_path(&self, hash: &Hash) -> PathBuf {
        let (dir, file) = hash.to_path_components();
        self.objects_path().join(dir).join(file)
    }
}
