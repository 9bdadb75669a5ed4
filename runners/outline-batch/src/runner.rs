//! 程序运行函数.

use crate::result::{BatchResult, FileReport};
use std::path::{Path, PathBuf};
use std::thread;
use swab_berry::prelude::*;
use utils::config::BatchConfig;
use utils::loader;

/// 叠加图会尝试的原图扩展名.
const IMAGE_EXTENSIONS: [&str; 4] = ["png", "jpg", "tif", "tiff"];

/// 实际运行.
///
/// 目录或参数错误会直接返回; 单个文件的错误会被记录在结果中, 其它文件继续处理.
pub fn run() -> Result<BatchResult, String> {
    let config = BatchConfig::from_env()?;
    let spec = config.iterative_spec().map_err(|e| e.to_string())?;

    let input_dir = loader::outline_dir_from_env_or_home()
        .ok_or_else(|| "Cannot determine the outline directory".to_string())?;
    if !input_dir.is_dir() {
        return Err(format!("`{}` is not a directory", input_dir.display()));
    }
    let output_dir = loader::output_dir_from_env_or(&input_dir);
    std::fs::create_dir_all(&output_dir)
        .map_err(|e| format!("Cannot create `{}`: {e}", output_dir.display()))?;
    let image_dir = loader::image_dir_from_env();

    let files: Vec<_> = loader::outline_loader(&input_dir)
        .map_err(|e| e.to_string())?
        .collect();
    log::info!(
        "Processing {} outline files from `{}` (window = {}, factor = {}^{})",
        files.len(),
        input_dir.display(),
        spec.window(),
        spec.step_factor(),
        spec.iterations()
    );

    let workers = utils::cpus().max(1);
    let chunk = files.len().div_ceil(workers).max(1);
    let ctx = Context {
        spec,
        output_dir: output_dir.as_path(),
        image_dir: image_dir.as_deref(),
        overlay: Overlay::default(),
    };

    let reports = thread::scope(|s| {
        let handles: Vec<_> = files
            .chunks(chunk)
            .map(|part| {
                let ctx = &ctx;
                s.spawn(move || {
                    part.iter()
                        .map(|(path, loaded)| ctx.process(path, loaded))
                        .collect::<Vec<_>>()
                })
            })
            .collect();
        handles
            .into_iter()
            .flat_map(|h| h.join().expect("Thread joining error"))
            .collect::<Vec<_>>()
    });

    Ok(BatchResult::new(reports))
}

/// 单个文件处理所需的共享参数.
struct Context<'a> {
    spec: IterativeSpec,
    output_dir: &'a Path,
    image_dir: Option<&'a Path>,
    overlay: Overlay,
}

impl Context<'_> {
    fn process(
        &self,
        path: &Path,
        loaded: &OutlineResult<OutlineSet>,
    ) -> (String, Result<FileReport, String>) {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let report = match loaded {
            Ok(outlines) => self.process_outlines(path, &name, outlines),
            Err(e) => Err(e.to_string()),
        };
        if let Err(e) = &report {
            log::warn!("Skipping `{name}`: {e}");
        }
        (name, report)
    }

    fn process_outlines(
        &self,
        path: &Path,
        name: &str,
        outlines: &[Outline],
    ) -> Result<FileReport, String> {
        let smoothed = self.spec.apply(outlines).map_err(|e| e.to_string())?;
        let saved_to = self.output_dir.join(name);
        save_outlines(&saved_to, &smoothed).map_err(|e| e.to_string())?;

        let overlay = match self.image_dir {
            Some(dir) => self.save_overlay(dir, path, outlines)?,
            None => None,
        };

        Ok(FileReport {
            summary: ShapeSummary::from_outlines(outlines),
            saved_to,
            overlay,
        })
    }

    /// 若原图存在则绘制叠加图. 原图不存在时返回 `Ok(None)`.
    fn save_overlay(
        &self,
        image_dir: &Path,
        outline_path: &Path,
        outlines: &[Outline],
    ) -> Result<Option<PathBuf>, String> {
        let Some(stem) = outline_path.file_stem() else {
            return Ok(None);
        };
        let Some(image_path) = IMAGE_EXTENSIONS
            .iter()
            .map(|ext| image_dir.join(format!("{}.{ext}", stem.to_string_lossy())))
            .find(|p| p.is_file())
        else {
            log::debug!("No image found for `{}`", outline_path.display());
            return Ok(None);
        };

        let base = image::open(&image_path)
            .map_err(|e| format!("Cannot open `{}`: {e}", image_path.display()))?
            .to_rgb8();
        let target = self
            .output_dir
            .join(format!("{}.overlay.png", stem.to_string_lossy()));
        let polygons = swab_berry::outline::polygons(outlines);
        self.overlay
            .save(&base, &polygons, &target)
            .map_err(|e| format!("Cannot save `{}`: {e}", target.display()))?;
        Ok(Some(target))
    }
}
