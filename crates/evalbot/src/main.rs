//! Entrypoint.

fn main() -> anyhow::Result<()> {
    evalbot::initialize_command_line()
}
