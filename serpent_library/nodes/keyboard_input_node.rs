use crate::messages::{key_codes, KeyboardInput, KEYBOARD_TOPIC};
use colored::Colorize;
use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
    PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::{execute, terminal};
use serpent_core::error::SerpentResult;
use serpent_core::{Hub, Node, NodeInfo, StopHandle};
use std::io;
use std::time::{Duration, Instant};

type Result<T> = SerpentResult<T>;

/// Quiet period after which a held key counts as released when the terminal
/// cannot report key-up events. Longer than a typical auto-repeat delay.
pub const DEFAULT_RELEASE_AFTER: Duration = Duration::from_millis(550);

struct HeldKey {
    key: String,
    code: u32,
    last_seen: Instant,
}

/// Keyboard Input Node - captures keys from the terminal
///
/// Puts the terminal into raw mode and publishes a `KeyboardInput` for every
/// key that goes down or up. Terminals that support the keyboard enhancement
/// protocol report real releases; elsewhere a release is synthesised once the
/// held key has stopped auto-repeating for the configured quiet period.
///
/// Raw mode swallows Ctrl+C, so Esc and Ctrl+C are routed to an optional
/// [`StopHandle`] instead of being published.
pub struct KeyboardInputNode {
    publisher: Hub<KeyboardInput>,
    release_after: Duration,
    held: Option<HeldKey>,
    enhanced: bool,
    raw_mode: bool,
    stop_handle: Option<StopHandle>,
}

impl KeyboardInputNode {
    /// Create a keyboard input node publishing on "snakeinput"
    pub fn new() -> Result<Self> {
        Self::new_with_topic(KEYBOARD_TOPIC)
    }

    pub fn new_with_topic(topic: &str) -> Result<Self> {
        Ok(Self {
            publisher: Hub::new(topic)?,
            release_after: DEFAULT_RELEASE_AFTER,
            held: None,
            enhanced: false,
            raw_mode: false,
            stop_handle: None,
        })
    }

    pub fn with_release_after(mut self, quiet_period: Duration) -> Self {
        self.release_after = quiet_period;
        self
    }

    /// Stop this scheduler on Esc or Ctrl+C
    pub fn with_stop_handle(mut self, handle: StopHandle) -> Self {
        self.stop_handle = Some(handle);
        self
    }

    /// Key name and DOM-style key code for a terminal key
    pub fn translate(code: &KeyCode) -> (String, u32) {
        match code {
            KeyCode::Left => ("ArrowLeft".to_string(), key_codes::ARROW_LEFT),
            KeyCode::Right => ("ArrowRight".to_string(), key_codes::ARROW_RIGHT),
            KeyCode::Up => ("ArrowUp".to_string(), key_codes::ARROW_UP),
            KeyCode::Down => ("ArrowDown".to_string(), key_codes::ARROW_DOWN),
            KeyCode::Esc => ("Escape".to_string(), key_codes::ESCAPE),
            KeyCode::Enter => ("Enter".to_string(), key_codes::ENTER),
            KeyCode::Char(' ') => (" ".to_string(), key_codes::SPACE),
            // Letters and digits use their upper-case ASCII value
            KeyCode::Char(c) if c.is_ascii_alphanumeric() => {
                (c.to_string(), c.to_ascii_uppercase() as u32)
            }
            KeyCode::Char(c) => (c.to_string(), key_codes::UNIDENTIFIED),
            other => (format!("{:?}", other), key_codes::UNIDENTIFIED),
        }
    }

    fn is_quit(key: &KeyEvent) -> bool {
        key.code == KeyCode::Esc
            || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
    }

    /// Process one terminal key event
    pub fn handle_key(&mut self, key: KeyEvent, mut ctx: Option<&mut NodeInfo>) {
        if key.kind == KeyEventKind::Press && Self::is_quit(&key) {
            if let Some(handle) = &self.stop_handle {
                if let Some(ctx) = ctx.as_deref_mut() {
                    ctx.log_info("Quit key pressed, stopping");
                }
                handle.stop();
            }
            return;
        }

        let (name, code) = Self::translate(&key.code);
        match key.kind {
            KeyEventKind::Press | KeyEventKind::Repeat => {
                let is_new = self
                    .held
                    .as_ref()
                    .map_or(true, |held| held.code != code || held.key != name);
                self.held = Some(HeldKey {
                    key: name.clone(),
                    code,
                    last_seen: Instant::now(),
                });
                // Auto-repeat only refreshes the held key
                if is_new {
                    self.publish(KeyboardInput::press(name, code), ctx);
                }
            }
            KeyEventKind::Release => {
                self.held = None;
                self.publish(KeyboardInput::release(name, code), ctx);
            }
        }
    }

    /// Synthesise a release for a key that has been quiet since `now - release_after`
    pub fn release_stale(&mut self, now: Instant, ctx: Option<&mut NodeInfo>) {
        let stale = self
            .held
            .as_ref()
            .is_some_and(|held| now.saturating_duration_since(held.last_seen) >= self.release_after);
        if !stale {
            return;
        }
        if let Some(held) = self.held.take() {
            self.publish(KeyboardInput::release(held.key, held.code), ctx);
        }
    }

    fn publish(&mut self, input: KeyboardInput, mut ctx: Option<&mut NodeInfo>) {
        if let Err(dropped) = self.publisher.send(input, ctx.as_deref_mut()) {
            if let Some(ctx) = ctx {
                ctx.log_warning(&format!("Keyboard queue full, dropped {:?}", dropped.key));
            }
        }
    }

    fn poll_terminal(&mut self, mut ctx: Option<&mut NodeInfo>) -> io::Result<()> {
        while event::poll(Duration::ZERO)? {
            if let Event::Key(key) = event::read()? {
                self.handle_key(key, ctx.as_deref_mut());
            }
        }
        Ok(())
    }
}

impl Node for KeyboardInputNode {
    fn name(&self) -> &'static str {
        "KeyboardInputNode"
    }

    fn init(&mut self, ctx: &mut NodeInfo) -> Result<()> {
        println!("{}", "Keyboard capture active".green().bold());
        println!("  {}  turn left", "Left / A ".cyan());
        println!("  {}  turn right", "Right / D".cyan());
        println!("  {}  quit", "Esc      ".cyan());

        terminal::enable_raw_mode()?;
        self.raw_mode = true;

        self.enhanced = matches!(terminal::supports_keyboard_enhancement(), Ok(true));
        if self.enhanced {
            execute!(
                io::stdout(),
                PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
            )?;
            ctx.log_info("Terminal reports key releases");
        } else {
            ctx.log_info(&format!(
                "Terminal cannot report key releases; releasing after {} ms without repeats",
                self.release_after.as_millis()
            ));
        }
        Ok(())
    }

    fn tick(&mut self, mut ctx: Option<&mut NodeInfo>) {
        if let Err(e) = self.poll_terminal(ctx.as_deref_mut()) {
            if let Some(ctx) = ctx.as_deref_mut() {
                ctx.log_error(&format!("Failed to read terminal events: {}", e));
            }
        }
        if !self.enhanced {
            self.release_stale(Instant::now(), ctx);
        }
    }

    fn shutdown(&mut self, ctx: &mut NodeInfo) -> Result<()> {
        if self.enhanced {
            execute!(io::stdout(), PopKeyboardEnhancementFlags)?;
            self.enhanced = false;
        }
        if self.raw_mode {
            terminal::disable_raw_mode()?;
            self.raw_mode = false;
        }
        ctx.log_info("Keyboard capture released");
        Ok(())
    }
}

impl Drop for KeyboardInputNode {
    fn drop(&mut self) {
        // Never leave the terminal in raw mode
        if self.raw_mode {
            let _ = terminal::disable_raw_mode();
        }
    }
}
