//! Generates the fixtures mounted under `src/datasets`.

fn main() -> Result<(), fixturegen::FixtureError> {
    fixturegen::build::Builder::new().generate()?;
    Ok(())
}
