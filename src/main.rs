use isotope_lab::app::WindowRenderer;
use isotope_lab::config::Config;
use isotope_lab::state::Session;
use isotope_lab::ui::prompt::TerminalPrompter;
use isotope_lab::workflow::Workflow;

fn main() {
    env_logger::init();

    let config = Config::from_env();
    log::info!("Reference table: {}", config.reference_table.display());

    let mut workflow = Workflow::new(
        Session::new(config),
        TerminalPrompter::stdin(),
        WindowRenderer,
    );
    workflow.run();
}
