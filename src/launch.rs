use std::process::Command;

/// Spawn `argv` as a fire-and-forget child: environment and stdio are
/// inherited and the child is never waited on. Spawn failures are logged
/// and never surface in the UI.
pub fn spawn_detached(argv: &[String]) {
    let Some((program, args)) = argv.split_first() else {
        return;
    };
    match Command::new(program).args(args).spawn() {
        Ok(child) => log::info!("launched {program} (pid {})", child.id()),
        Err(err) => log::warn!("failed to launch {program}: {err}"),
    }
}
