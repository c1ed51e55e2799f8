use anyhow::Result;
use fsmi::driver;

fn main() -> Result<()> {
    env_logger::init();
    driver()?;
    Ok(())
}
