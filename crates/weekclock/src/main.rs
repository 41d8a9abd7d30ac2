use relm4::prelude::*;
use weekclock::config;
use weekclock::gui::app::AppModel;
use weekclock::gui::clock::State;
use weekclock::sys::runtime;

fn main() {
    env_logger::init();

    let config = config::load_or_default();
    let state = State::new(config);

    let (tx, rx) = async_channel::bounded(32);

    runtime::start_background_services(tx);

    let app = RelmApp::new("org.heptaweek.weekclock");

    app.run::<AppModel>((state, rx));
}
