use anyhow::{bail, Context};
use gifsplit::{decoder, encoder};
use log::info;
use std::env;
use std::fs;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let path = match env::args().nth(1) {
        Some(path) => path,
        None => bail!("usage: gifsplit <input.gif>"),
    };
    let bytes = fs::read(&path).with_context(|| format!("failed to read '{}'", path))?;
    let gif = decoder::decode(&bytes)?;
    println!(
        "Size: {} x {}, frames: {}",
        gif.width,
        gif.height,
        gif.frames.len()
    );

    let stamp = SystemTime::now().duration_since(UNIX_EPOCH)?.as_secs();
    let folder = PathBuf::from(format!("frames-{}", stamp));
    fs::create_dir_all(&folder)
        .with_context(|| format!("failed to create '{}'", folder.display()))?;

    for (i, frame) in gif.frames.iter().enumerate() {
        let data = encoder::encode_frame(&gif, frame);
        let filename = folder.join(format!("{}.gif", i));
        fs::write(&filename, &data)
            .with_context(|| format!("failed to write '{}'", filename.display()))?;
        info!("Wrote {} ({} bytes)", filename.display(), data.len());
    }
    println!("Wrote {} frame(s) to {}", gif.frames.len(), folder.display());

    Ok(())
}
