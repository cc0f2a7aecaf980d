use anyhow::Result;
use vergen::EmitBuilder;

// VERGEN_BUILD_DATE and VERGEN_GIT_DESCRIBE end up in `rkdump --version`.
fn main() -> Result<()> {
    EmitBuilder::builder()
        .build_date()
        .git_describe(true, true, None)
        .emit()?;

    Ok(())
}
