use eframe::{egui, App, CreationContext};
use egui::{Color32, Pos2, Rect};
use serpent::library::algorithms::shading::Rgba;
use serpent::library::messages::key_codes;
use serpent::prelude::*;

const BG_COLOR: Color32 = Color32::from_rgb(245, 245, 245);
const STATUS_COLOR: Color32 = Color32::from_rgb(90, 90, 90);

pub fn main() -> std::result::Result<(), eframe::Error> {
    tracing_subscriber::fmt::init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([640.0, 480.0])
            .with_resizable(false),
        ..Default::default()
    };

    eframe::run_native(
        "Snakesim GUI",
        options,
        Box::new(|_cc: &CreationContext| Box::new(SnakesimApp::new())),
    )
}

/// Window host: owns the scheduler and ticks it once per repaint
struct SnakesimApp {
    params: RuntimeParams,
    scheduler: Option<Scheduler>,
    keyboard_publisher: Option<Hub<KeyboardInput>>,
    frame_subscriber: Option<Hub<FrameSnapshot>>,
    last_frame: Option<FrameSnapshot>,
    error: Option<String>,
}

impl SnakesimApp {
    fn new() -> Self {
        Self {
            params: RuntimeParams::default(),
            scheduler: None,
            keyboard_publisher: None,
            frame_subscriber: None,
            last_frame: None,
            error: None,
        }
    }

    /// The playfield is only known once the panel has been laid out
    fn start(&mut self, size: egui::Vec2) -> Result<()> {
        let playfield = Playfield::new(size.x as f64, size.y as f64)?;
        let game = SnakeGame::new(playfield, GameConfig::from_params(&self.params))?;

        let config = SchedulerConfig {
            name: "SnakesimGui".to_string(),
            install_signal_handler: false,
            ..SchedulerConfig::from_params(&self.params)
        };
        let mut scheduler = Scheduler::new()
            .with_config(config)
            .with_params(self.params.clone());
        scheduler
            .add(Box::new(SnakeControlNode::new()?), 1, Some(true))
            .add(Box::new(SnakeSimNode::new(game)?), 2, Some(true));

        self.keyboard_publisher = Some(Hub::new(KEYBOARD_TOPIC)?);
        self.frame_subscriber = Some(Hub::new(FRAME_TOPIC)?);
        self.scheduler = Some(scheduler);
        tracing::info!("Playfield {:.0}x{:.0}", size.x, size.y);
        Ok(())
    }

    /// Window key events become KeyboardInput messages
    fn forward_keys(&self, ctx: &egui::Context) {
        let Some(publisher) = &self.keyboard_publisher else {
            return;
        };
        ctx.input(|input| {
            for event in &input.events {
                if let egui::Event::Key {
                    key,
                    pressed,
                    repeat: false,
                    ..
                } = event
                {
                    let (name, code) = translate(*key);
                    let _ = publisher.send(KeyboardInput::new(name, code, *pressed), None);
                }
            }
        });
    }

    fn paint(&self, painter: &egui::Painter, rect: Rect) {
        painter.rect_filled(rect, 0.0, BG_COLOR);
        let Some(frame) = &self.last_frame else {
            return;
        };
        let at = |x: f64, y: f64| Pos2::new(rect.left() + x as f32, rect.top() + y as f32);

        painter.circle_filled(
            at(frame.food.x, frame.food.y),
            frame.food.radius as f32,
            to_color32(frame.food.color),
        );
        // Tail first so the head overlaps its neighbours
        for segment in frame.segments.iter().rev() {
            painter.circle_filled(
                at(segment.x, segment.y),
                segment.radius as f32,
                to_color32(segment.color),
            );
        }

        painter.text(
            rect.left_bottom() + egui::vec2(8.0, -8.0),
            egui::Align2::LEFT_BOTTOM,
            format!(
                "length {}  longest {}  resets {}",
                frame.length(),
                frame.longest,
                frame.deaths
            ),
            egui::FontId::monospace(12.0),
            STATUS_COLOR,
        );
    }
}

fn translate(key: egui::Key) -> (String, u32) {
    match key {
        egui::Key::ArrowLeft => ("ArrowLeft".to_string(), key_codes::ARROW_LEFT),
        egui::Key::ArrowRight => ("ArrowRight".to_string(), key_codes::ARROW_RIGHT),
        egui::Key::ArrowUp => ("ArrowUp".to_string(), key_codes::ARROW_UP),
        egui::Key::ArrowDown => ("ArrowDown".to_string(), key_codes::ARROW_DOWN),
        egui::Key::A => ("a".to_string(), key_codes::KEY_A),
        egui::Key::D => ("d".to_string(), key_codes::KEY_D),
        egui::Key::Escape => ("Escape".to_string(), key_codes::ESCAPE),
        other => (other.name().to_string(), key_codes::UNIDENTIFIED),
    }
}

fn to_color32(color: Rgba) -> Color32 {
    Color32::from_rgba_unmultiplied(color.r, color.g, color.b, color.a)
}

impl App for SnakesimApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default()
            .frame(egui::Frame::none())
            .show(ctx, |ui| {
                let rect = ui.available_rect_before_wrap();

                if self.scheduler.is_none() && self.error.is_none() {
                    if let Err(e) = self.start(rect.size()) {
                        tracing::error!("Failed to start simulation: {}", e);
                        self.error = Some(e.to_string());
                    }
                }
                if let Some(error) = &self.error {
                    ui.colored_label(Color32::RED, error);
                    return;
                }

                self.forward_keys(ctx);
                if let Some(scheduler) = &mut self.scheduler {
                    scheduler.tick_once();
                }
                if let Some(frame) = self
                    .frame_subscriber
                    .as_ref()
                    .and_then(|frames| frames.recv_latest(None))
                {
                    self.last_frame = Some(frame);
                }

                self.paint(ui.painter(), rect);
            });

        ctx.request_repaint(); // Continually redraw
    }
}

impl Drop for SnakesimApp {
    fn drop(&mut self) {
        if let Some(scheduler) = &mut self.scheduler {
            scheduler.shutdown_nodes();
        }
    }
}
