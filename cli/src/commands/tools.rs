use dayplan_core::api::{self as core_api, CliError};
use dayplan_plugins::factory;

pub fn handle_tools(ctx: &core_api::AppContext) -> Result<(), CliError> {
    let Some(registry) = factory::build_tools(ctx.cfg()) else {
        println!("No tools registered");
        return Ok(());
    };
    for name in registry.names() {
        let description = registry
            .get(name)
            .map(|t| t.description().to_string())
            .unwrap_or_default();
        println!("{name}\t{description}");
    }
    Ok(())
}
