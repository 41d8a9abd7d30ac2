use crate::config;
use crate::events::AppEvent;
use crate::gui::clock::{self, State};
use crate::gui::{theme, window};
use crate::sys::wm;
use gtk::prelude::*;
use gtk4 as gtk;
use relm4::prelude::*;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Instant;

pub struct AppModel {
    pub state: Rc<RefCell<State>>,
    pub visible: bool,
    pub root: gtk::ApplicationWindow,
    pub drawing_area: gtk::DrawingArea,
    animating: Rc<Cell<bool>>,
}

#[derive(Debug)]
pub enum AppMsg {
    Show,
    Hide,
    Toggle,
    ConfigReload,
}

impl From<AppEvent> for AppMsg {
    fn from(event: AppEvent) -> Self {
        match event {
            AppEvent::Show => AppMsg::Show,
            AppEvent::Hide => AppMsg::Hide,
            AppEvent::Toggle => AppMsg::Toggle,
            AppEvent::ConfigReload => AppMsg::ConfigReload,
        }
    }
}

impl AppModel {
    fn show(&mut self) {
        let monitor_height = wm::get_active_monitor()
            .and_then(|name| window::place_on_monitor(&self.root, &name))
            .unwrap_or(clock::REFERENCE_HEIGHT);

        self.state
            .borrow_mut()
            .refresh(monitor_height, Instant::now());
        self.visible = true;
        self.drawing_area.queue_draw();
        self.start_animation();
    }

    // redraw every frame until the entrance has played out
    fn start_animation(&self) {
        if self.animating.replace(true) {
            return;
        }
        let state = self.state.clone();
        let animating = self.animating.clone();
        self.drawing_area.add_tick_callback(move |area, _| {
            area.queue_draw();
            if state.borrow().entrance.is_running(Instant::now()) {
                glib::ControlFlow::Continue
            } else {
                animating.set(false);
                glib::ControlFlow::Break
            }
        });
    }

    fn reload(&mut self) {
        match config::load_config() {
            Ok(new_config) => match self.state.borrow_mut().reload(new_config) {
                Ok(()) => log::info!("Configuration reloaded"),
                Err(e) => log::error!("Keeping previous configuration: {}", e),
            },
            Err(e) => log::error!("Failed to reload config: {}", e),
        }
        self.drawing_area.queue_draw();
    }
}

#[relm4::component(pub)]
impl SimpleComponent for AppModel {
    type Init = (State, async_channel::Receiver<AppEvent>);
    type Input = AppMsg;
    type Output = ();

    view! {
        #[root]
        #[name = "window"]
        gtk::ApplicationWindow {
            set_title: Some("Week Clock"),
            #[watch]
            set_visible: model.visible,
            #[watch]
            set_opacity: if model.visible { 1.0 } else { 0.0 },
            add_css_class: "weekclock-window",
            set_decorated: false,

            add_controller = gtk::EventControllerKey {
                connect_key_pressed[sender] => move |_, key, _, _| {
                    if key == gtk::gdk::Key::Escape {
                        sender.input(AppMsg::Hide);
                        return glib::Propagation::Stop;
                    }
                    glib::Propagation::Proceed
                }
            },

            #[name = "drawing_area"]
            gtk::DrawingArea {
                set_hexpand: true,
                set_vexpand: true,
                add_css_class: "weekclock-drawing-area",

                add_controller = gtk::GestureClick {
                    set_button: 0,
                    connect_released[sender] => move |_, _, _, _| {
                        sender.input(AppMsg::Hide);
                    }
                }
            }
        }
    }

    fn init(
        init: Self::Init,
        root: Self::Root,
        sender: ComponentSender<Self>,
    ) -> ComponentParts<Self> {
        let (state, rx) = init;

        theme::load_css();
        window::init_layer_shell(&root);

        let state = Rc::new(RefCell::new(state));

        let model = AppModel {
            state: state.clone(),
            visible: false,
            root: root.clone(),
            drawing_area: gtk::DrawingArea::default(),
            animating: Rc::new(Cell::new(false)),
        };

        let widgets = view_output!();

        let mut model = model;
        model.drawing_area = widgets.drawing_area.clone();

        let state_draw = model.state.clone();
        widgets
            .drawing_area
            .set_draw_func(move |drawing_area, cr, width, height| {
                let style = theme::style_from_context(&drawing_area.style_context());
                if let Err(e) = clock::draw(
                    cr,
                    &mut state_draw.borrow_mut(),
                    &style,
                    width as f64,
                    height as f64,
                    Instant::now(),
                ) {
                    log::error!("Drawing error: {}", e);
                }
            });

        let sender_clone = sender.clone();
        relm4::spawn(async move {
            while let Ok(event) = rx.recv().await {
                sender_clone.input(AppMsg::from(event));
            }
        });

        root.set_visible(false);

        ComponentParts { model, widgets }
    }

    fn update(&mut self, msg: Self::Input, _sender: ComponentSender<Self>) {
        match msg {
            AppMsg::Show => self.show(),
            AppMsg::Hide => self.visible = false,
            AppMsg::Toggle if self.visible => self.visible = false,
            AppMsg::Toggle => self.show(),
            AppMsg::ConfigReload => self.reload(),
        }
    }
}
