fn main() -> anyhow::Result<()> {
    stickerboard::run()?;
    Ok(())
}
