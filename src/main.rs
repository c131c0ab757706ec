mod config;
mod error;
mod instance;
mod launch;
mod menu;
mod types;

use gtk::prelude::WidgetExt;
use gtk::prelude::*;
use gtk4_layer_shell::{Layer, LayerShell};
use relm4::factory::FactoryVecDeque;
use relm4::gtk::CssProvider;
use relm4::prelude::*;
use std::path::PathBuf;

use crate::menu::{MenuEvent, MenuState, Transition};
use crate::types::Entry;

#[derive(Debug)]
struct EntryRow {
    name: String,
    selected: bool,
}

#[relm4::factory]
impl FactoryComponent for EntryRow {
    type ParentWidget = gtk::Box;
    type CommandOutput = ();
    type Input = bool;
    type Output = usize;
    type Init = Entry;

    view! {
        #[root]
        root_box = gtk::Box {
            gtk::Button {
                #[watch]
                set_css_classes: if self.selected { &["flat", "rounded", "selected"] } else { &["flat", "rounded"] },
                set_can_focus: false,
                set_focusable: false,
                set_hexpand: true,
                connect_clicked[sender, index] => move |_| {
                    let _ = sender.output(index.current_index());
                },
                gtk::Label {
                    set_label: &self.name,
                    set_halign: gtk::Align::Start,
                },
            },
        }
    }

    fn init_model(entry: Self::Init, _index: &DynamicIndex, _sender: FactorySender<Self>) -> Self {
        Self {
            name: entry.name,
            selected: false,
        }
    }

    fn update(&mut self, selected: Self::Input, _sender: FactorySender<Self>) {
        self.selected = selected;
    }
}

struct App {
    state: MenuState,
    entries: Vec<Entry>,
    rows: FactoryVecDeque<EntryRow>,
    window: adw::ApplicationWindow,
}

impl std::fmt::Debug for App {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("App")
            .field("state", &self.state)
            .finish()
    }
}

#[derive(Debug)]
enum Msg {
    NavigateUp,
    NavigateDown,
    Activate,
    Cancel,
    RowClicked(usize),
}

#[relm4::component]
impl SimpleComponent for App {
    type Input = Msg;
    type Output = ();
    type Init = Vec<Entry>;

    view! {
        #[name = "window"]
        adw::ApplicationWindow {
            set_title: Some("rcmenu"),
            set_default_size: (400, -1),
            gtk::ScrolledWindow {
                set_propagate_natural_height: true,
                set_propagate_natural_width: true,
                #[local_ref]
                rows_box -> gtk::Box {
                    set_orientation: gtk::Orientation::Vertical,
                    set_spacing: 6,
                    set_margin_all: 12,
                }
            }
        }
    }

    fn init(
        entries: Self::Init,
        root: Self::Root,
        sender: ComponentSender<Self>,
    ) -> ComponentParts<Self> {
        let mut rows = FactoryVecDeque::builder()
            .launch(gtk::Box::default())
            .forward(sender.input_sender(), Msg::RowClicked);

        for entry in &entries {
            rows.guard().push_back(entry.clone());
        }

        let mut model = App {
            state: MenuState::new(&entries),
            entries,
            rows,
            window: root.clone(),
        };

        let rows_box = model.rows.widget();
        let widgets = view_output!();

        // Highlight the initial selection
        if !model.rows.is_empty() {
            model.rows.send(0, true);
        }

        // Load CSS
        let css = CssProvider::new();
        css.load_from_string(include_str!("style.css"));
        gtk::style_context_add_provider_for_display(
            &WidgetExt::display(&widgets.window),
            &css,
            gtk::STYLE_PROVIDER_PRIORITY_APPLICATION,
        );

        // Setup layer shell
        widgets.window.init_layer_shell();
        widgets.window.set_layer(Layer::Overlay);
        widgets
            .window
            .set_keyboard_mode(gtk4_layer_shell::KeyboardMode::Exclusive);

        // Add keyboard event controller
        let key_controller = gtk::EventControllerKey::new();
        let sender_clone = sender.clone();
        key_controller.connect_key_pressed(move |_controller, key, _code, _modifier| match key {
            gtk::gdk::Key::Up | gtk::gdk::Key::k => {
                sender_clone.input(Msg::NavigateUp);
                gtk::glib::Propagation::Stop
            }
            gtk::gdk::Key::Down | gtk::gdk::Key::j => {
                sender_clone.input(Msg::NavigateDown);
                gtk::glib::Propagation::Stop
            }
            gtk::gdk::Key::Return | gtk::gdk::Key::KP_Enter | gtk::gdk::Key::space => {
                sender_clone.input(Msg::Activate);
                gtk::glib::Propagation::Stop
            }
            gtk::gdk::Key::Escape => {
                sender_clone.input(Msg::Cancel);
                gtk::glib::Propagation::Stop
            }
            _ => gtk::glib::Propagation::Proceed,
        });
        widgets.window.add_controller(key_controller);

        ComponentParts { model, widgets }
    }

    fn update(&mut self, msg: Msg, _sender: ComponentSender<Self>) {
        match msg {
            Msg::NavigateUp => {
                let transition = self.state.handle(MenuEvent::MoveUp);
                self.apply(transition);
            }
            Msg::NavigateDown => {
                let transition = self.state.handle(MenuEvent::MoveDown);
                self.apply(transition);
            }
            Msg::Activate => {
                let transition = self.state.handle(MenuEvent::Submit);
                self.apply(transition);
            }
            Msg::Cancel => {
                let transition = self.state.handle(MenuEvent::Cancel);
                self.apply(transition);
            }
            Msg::RowClicked(index) => {
                let moved = self.state.select(index);
                self.apply(moved);
                let transition = self.state.handle(MenuEvent::Submit);
                self.apply(transition);
            }
        }
    }
}

impl App {
    fn apply(&mut self, transition: Transition) {
        match transition {
            Transition::Idle => {}
            Transition::Moved { from, to } => {
                self.rows.send(from, false);
                self.rows.send(to, true);
            }
            Transition::Launched { index, close } => {
                launch::spawn_detached(&self.entries[index].command);
                if close {
                    self.window.destroy();
                }
            }
            Transition::Closed => self.window.destroy(),
        }
    }
}

fn run() -> error::Result<()> {
    let lock_path = instance::lock_path()?;
    let lock = match instance::acquire(&lock_path)? {
        instance::Acquire::Locked(lock) => lock,
        instance::Acquire::Held { pid } => {
            println!("rcmenu already started (pid {pid}) -- killing");
            instance::preempt(&lock_path, pid);
            return Ok(());
        }
    };

    let config = config::ConfigFile::locate(std::env::args_os().nth(1).map(PathBuf::from))?;
    let entries = config.parse()?;
    log::info!("{} entries from {}", entries.len(), config.path().display());

    // Keep GTK away from our CLI argument (the config path override)
    let app = RelmApp::new("org.rcmenu.Menu").with_args(Vec::new());
    app.run::<App>(entries);

    drop(lock);
    Ok(())
}

fn main() {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    if let Err(err) = run() {
        eprintln!("{err}");
        std::process::exit(1);
    }
}
