use std::path::Path;

use anyhow::Context;

use crate::scene_file::DEMO_SCENE;

pub fn run(path: &Path, force: bool) -> anyhow::Result<()> {
    if path.exists() && !force {
        anyhow::bail!("{} already exists (use --force to overwrite)", path.display());
    }
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create {}", dir.display()))?;
    }
    std::fs::write(path, DEMO_SCENE)
        .with_context(|| format!("Failed to write {}", path.display()))?;

    println!("Wrote demo scene to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene_file::SceneFile;

    #[test]
    fn test_init_writes_loadable_scene() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scenes/demo.toml");

        run(&path, false).unwrap();

        let file = SceneFile::load(&path).unwrap();
        assert!(file.build().is_ok());
    }

    #[test]
    fn test_init_refuses_to_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("demo.toml");
        std::fs::write(&path, "keep me").unwrap();

        assert!(run(&path, false).is_err());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "keep me");

        run(&path, true).unwrap();
        assert!(std::fs::read_to_string(&path).unwrap().contains("[[entity]]"));
    }
}
