use std::path::Path;
use std::time::Duration;

use followcam_scene::{App, FixedClock, FrameClock, RealtimeClock};

use super::{fmt_rotation, fmt_vec3};
use crate::scene_file::SceneFile;

pub struct RunOptions {
    pub frames: u32,
    pub dt: f32,
    pub realtime: bool,
    pub aspect: Option<f32>,
}

pub fn run(path: &Path, opts: RunOptions) -> anyhow::Result<()> {
    if !opts.realtime && !(opts.dt >= 0.0 && opts.dt.is_finite()) {
        anyhow::bail!("--dt must be a non-negative number of seconds, got {}", opts.dt);
    }

    let mut app = SceneFile::load(path)?.build()?;
    if let Some(aspect) = opts.aspect {
        app.aspect = aspect;
    }
    if app.active_camera.is_none() {
        log::warn!("no active_camera in {}; frames will not draw", path.display());
    }

    let mut clock: Box<dyn FrameClock> = if opts.realtime {
        Box::new(RealtimeClock::new())
    } else {
        let step = Duration::try_from_secs_f32(opts.dt)
            .map_err(|e| anyhow::anyhow!("--dt {} is not a usable step: {e}", opts.dt))?;
        Box::new(FixedClock::new(step))
    };

    let draws = simulate(&mut app, clock.as_mut(), opts.frames)?;

    println!("Simulated {} frames, {} draw calls", app.frames(), draws);
    for (_, depth, entity) in app.scene.iter().with_depth().skip(1) {
        println!(
            "{:indent$}{:<12} at {}  rotation {}",
            "",
            entity.name,
            fmt_vec3(entity.world_position()),
            fmt_rotation(entity.transform.rotation),
            indent = (depth - 1) * 2
        );
    }
    Ok(())
}

/// Step `frames` frames; returns the total number of draws.
fn simulate(app: &mut App, clock: &mut dyn FrameClock, frames: u32) -> anyhow::Result<usize> {
    let mut draws = 0;
    for n in 0..frames {
        let report = app.frame(clock)?;
        log::debug!("frame {n}: dt {:?}, {} draws", report.delta_seconds, report.draws);
        draws += report.draws;
    }
    Ok(draws)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene_file::DEMO_SCENE;

    #[test]
    fn test_simulate_counts_draws() {
        let mut app = SceneFile::parse(DEMO_SCENE).unwrap().build().unwrap();
        let mut clock = FixedClock::new(Duration::from_millis(16));

        let draws = simulate(&mut app, &mut clock, 10).unwrap();

        assert_eq!(draws, 30);
        assert_eq!(app.frames(), 10);
    }

    #[test]
    fn test_run_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("demo.toml");
        std::fs::write(&path, DEMO_SCENE).unwrap();

        let opts = RunOptions {
            frames: 5,
            dt: 0.02,
            realtime: false,
            aspect: Some(16.0 / 9.0),
        };
        run(&path, opts).unwrap();
    }

    #[test]
    fn test_negative_dt_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("demo.toml");
        std::fs::write(&path, DEMO_SCENE).unwrap();

        let opts = RunOptions {
            frames: 1,
            dt: -1.0,
            realtime: false,
            aspect: None,
        };
        assert!(run(&path, opts).is_err());
    }

    #[test]
    fn test_huge_dt_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("demo.toml");
        std::fs::write(&path, DEMO_SCENE).unwrap();

        let opts = RunOptions {
            frames: 1,
            dt: 1e20,
            realtime: false,
            aspect: None,
        };
        let err = run(&path, opts).unwrap_err().to_string();
        assert!(err.contains("--dt"), "{err}");
    }
}
