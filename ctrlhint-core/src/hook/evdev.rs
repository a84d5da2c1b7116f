use std::collections::{HashMap, HashSet};
use std::io;
use std::os::fd::{AsRawFd, BorrowedFd};
use std::path::PathBuf;
use std::sync::{Arc, Mutex, PoisonError};
use std::thread;
use std::time::Duration;

use evdev::{Device, InputEvent, InputEventKind, Key};
use nix::fcntl::{FcntlArg, OFlag, fcntl};

use super::{Hook, HookGuard, KeyHandler, KeySource};
use crate::errors::{HintError, Result};
use crate::key::{NamedKey, PhysicalKey};

const POLL_TIMEOUT: Duration = Duration::from_millis(100);

#[derive(Clone, Copy, Debug)]
enum KeyEventType {
    Release,
    Press,
    Repeat,
    Unknown,
}

impl From<i32> for KeyEventType {
    fn from(value: i32) -> Self {
        match value {
            0 => Self::Release,
            1 => Self::Press,
            2 => Self::Repeat,
            _ => Self::Unknown,
        }
    }
}

/// Reads key events straight from `/dev/input` keyboards.
///
/// The user needs read access to the event devices (usually membership in
/// the `input` group).
#[derive(Debug, Default, Clone)]
pub struct EvdevSource {
    paths: Option<Vec<PathBuf>>,
}

impl EvdevSource {
    /// Uses the given device nodes instead of scanning for keyboards.
    #[must_use]
    pub fn with_paths(paths: Vec<PathBuf>) -> Self {
        Self { paths: Some(paths) }
    }

    fn keyboards(&self) -> Vec<(PathBuf, Device)> {
        match &self.paths {
            Some(paths) => paths
                .iter()
                .filter_map(|path| match Device::open(path) {
                    Ok(device) => Some((path.clone(), device)),
                    Err(err) => {
                        tracing::warn!("Unable to open {}: {}", path.display(), err);
                        None
                    }
                })
                .collect(),
            None => evdev::enumerate()
                .filter(|(_, device)| is_keyboard(device))
                .collect(),
        }
    }
}

impl KeySource for EvdevSource {
    fn install(&self, handler: Arc<dyn KeyHandler>) -> Result<Hook> {
        let mut hook = Hook::default();
        let keyboards = Arc::new(Keyboards::new(handler));
        let mut watched = 0;
        for (path, mut device) in self.keyboards() {
            let poll = match register(&device) {
                Ok(poll) => poll,
                Err(err) => {
                    tracing::warn!("Unable to poll {}: {}", path.display(), err);
                    continue;
                }
            };
            let guard = hook.guard();
            let keyboards = keyboards.clone();
            let index = watched;
            tracing::debug!(
                "Watching keyboard {} ({})",
                path.display(),
                device.name().unwrap_or("unnamed")
            );
            thread::Builder::new()
                .name(format!("evdev-{index}"))
                .spawn(move || {
                    watch(
                        poll,
                        &guard,
                        || device.fetch_events().map(Iterator::collect),
                        |event| keyboards.dispatch(index, event),
                    );
                })?;
            watched += 1;
        }
        if watched == 0 {
            return Err(HintError::KeyboardNotFound);
        }
        Ok(hook)
    }
}

/// Merges the key streams of every watched keyboard. A key held on several
/// devices is released only once the last of them lets go.
struct Keyboards {
    held: Mutex<HashMap<PhysicalKey, HashSet<usize>>>,
    handler: Arc<dyn KeyHandler>,
}

impl Keyboards {
    fn new(handler: Arc<dyn KeyHandler>) -> Self {
        Self {
            held: Mutex::new(HashMap::new()),
            handler,
        }
    }

    fn dispatch(&self, device: usize, event: &InputEvent) {
        let InputEventKind::Key(key) = event.kind() else {
            return;
        };
        let physical = physical_key(key);
        // The handler runs under the lock so devices cannot reorder a
        // release against a press of the same key.
        let mut held = self.held.lock().unwrap_or_else(PoisonError::into_inner);
        match KeyEventType::from(event.value()) {
            KeyEventType::Press | KeyEventType::Repeat => {
                held.entry(physical).or_default().insert(device);
                self.handler.on_key_down(physical);
            }
            KeyEventType::Release => {
                let still_held = held.get_mut(&physical).is_some_and(|devices| {
                    devices.remove(&device);
                    !devices.is_empty()
                });
                if !still_held {
                    held.remove(&physical);
                    self.handler.on_key_up(physical);
                }
            }
            KeyEventType::Unknown => {}
        }
    }
}

fn is_keyboard(device: &Device) -> bool {
    device
        .supported_keys()
        .is_some_and(|keys| keys.contains(Key::KEY_A) && keys.contains(Key::KEY_LEFTCTRL))
}

/// Switches the fd to non-blocking reads and registers it with a new poll.
fn register(source: &impl AsRawFd) -> io::Result<mio::Poll> {
    const KEYBOARD: mio::Token = mio::Token(0);
    let fd = source.as_raw_fd();
    // SAFETY: `source` owns the fd and outlives this borrow.
    let borrowed = unsafe { BorrowedFd::borrow_raw(fd) };
    let flags = OFlag::from_bits_truncate(fcntl(borrowed, FcntlArg::F_GETFL)?);
    fcntl(borrowed, FcntlArg::F_SETFL(flags | OFlag::O_NONBLOCK))?;

    let poll = mio::Poll::new()?;
    poll.registry().register(
        &mut mio::unix::SourceFd(&fd),
        KEYBOARD,
        mio::Interest::READABLE,
    )?;
    Ok(poll)
}

/// Reads events until the guard is released or the device goes away.
fn watch(
    mut poll: mio::Poll,
    guard: &HookGuard,
    mut fetch: impl FnMut() -> io::Result<Vec<InputEvent>>,
    mut deliver: impl FnMut(&InputEvent),
) {
    let mut events = mio::Events::with_capacity(1);
    loop {
        if guard.is_released() {
            return;
        }

        if let Err(err) = poll.poll(&mut events, Some(POLL_TIMEOUT)) {
            if err.kind() != io::ErrorKind::Interrupted {
                tracing::warn!("Evdev device poll failed with {:?}", err);
            }
            continue;
        }
        if events.is_empty() {
            continue;
        }

        // Edge triggered: drain until the device would block.
        while !guard.is_released() {
            match fetch() {
                Ok(input_events) => input_events.iter().for_each(&mut deliver),
                Err(err) if err.kind() == io::ErrorKind::WouldBlock => break,
                Err(err) => {
                    tracing::warn!("Keyboard went away: {}", err);
                    return;
                }
            }
        }
    }
}

/// Maps an evdev key code to the hook's key identity, using a US layout for
/// printable keys.
#[must_use]
pub fn physical_key(key: Key) -> PhysicalKey {
    let c = match key {
        Key::KEY_LEFTCTRL => return PhysicalKey::ControlLeft,
        Key::KEY_RIGHTCTRL => return PhysicalKey::ControlRight,
        Key::KEY_LEFTALT => return PhysicalKey::AltLeft,
        Key::KEY_RIGHTALT => return PhysicalKey::AltRight,
        Key::KEY_LEFTMETA => return PhysicalKey::SuperLeft,
        Key::KEY_RIGHTMETA => return PhysicalKey::SuperRight,
        Key::KEY_A => 'a',
        Key::KEY_B => 'b',
        Key::KEY_C => 'c',
        Key::KEY_D => 'd',
        Key::KEY_E => 'e',
        Key::KEY_F => 'f',
        Key::KEY_G => 'g',
        Key::KEY_H => 'h',
        Key::KEY_I => 'i',
        Key::KEY_J => 'j',
        Key::KEY_K => 'k',
        Key::KEY_L => 'l',
        Key::KEY_M => 'm',
        Key::KEY_N => 'n',
        Key::KEY_O => 'o',
        Key::KEY_P => 'p',
        Key::KEY_Q => 'q',
        Key::KEY_R => 'r',
        Key::KEY_S => 's',
        Key::KEY_T => 't',
        Key::KEY_U => 'u',
        Key::KEY_V => 'v',
        Key::KEY_W => 'w',
        Key::KEY_X => 'x',
        Key::KEY_Y => 'y',
        Key::KEY_Z => 'z',
        Key::KEY_1 => '1',
        Key::KEY_2 => '2',
        Key::KEY_3 => '3',
        Key::KEY_4 => '4',
        Key::KEY_5 => '5',
        Key::KEY_6 => '6',
        Key::KEY_7 => '7',
        Key::KEY_8 => '8',
        Key::KEY_9 => '9',
        Key::KEY_0 => '0',
        Key::KEY_MINUS => '-',
        Key::KEY_EQUAL => '=',
        Key::KEY_LEFTBRACE => '[',
        Key::KEY_RIGHTBRACE => ']',
        Key::KEY_SEMICOLON => ';',
        Key::KEY_APOSTROPHE => '\'',
        Key::KEY_GRAVE => '`',
        Key::KEY_BACKSLASH => '\\',
        Key::KEY_COMMA => ',',
        Key::KEY_DOT => '.',
        Key::KEY_SLASH => '/',
        other => {
            return named_key(other)
                .map_or(PhysicalKey::Other(u32::from(other.code())), PhysicalKey::Named);
        }
    };
    PhysicalKey::Char(c)
}

fn named_key(key: Key) -> Option<NamedKey> {
    let named = match key {
        Key::KEY_TAB => NamedKey::Tab,
        Key::KEY_ENTER | Key::KEY_KPENTER => NamedKey::Enter,
        Key::KEY_SPACE => NamedKey::Space,
        Key::KEY_BACKSPACE => NamedKey::Backspace,
        Key::KEY_DELETE => NamedKey::Delete,
        Key::KEY_ESC => NamedKey::Escape,
        Key::KEY_F1 => NamedKey::F(1),
        Key::KEY_F2 => NamedKey::F(2),
        Key::KEY_F3 => NamedKey::F(3),
        Key::KEY_F4 => NamedKey::F(4),
        Key::KEY_F5 => NamedKey::F(5),
        Key::KEY_F6 => NamedKey::F(6),
        Key::KEY_F7 => NamedKey::F(7),
        Key::KEY_F8 => NamedKey::F(8),
        Key::KEY_F9 => NamedKey::F(9),
        Key::KEY_F10 => NamedKey::F(10),
        Key::KEY_F11 => NamedKey::F(11),
        Key::KEY_F12 => NamedKey::F(12),
        Key::KEY_UP => NamedKey::Up,
        Key::KEY_DOWN => NamedKey::Down,
        Key::KEY_LEFT => NamedKey::Left,
        Key::KEY_RIGHT => NamedKey::Right,
        Key::KEY_HOME => NamedKey::Home,
        Key::KEY_END => NamedKey::End,
        Key::KEY_PAGEUP => NamedKey::PageUp,
        Key::KEY_PAGEDOWN => NamedKey::PageDown,
        Key::KEY_INSERT => NamedKey::Insert,
        _ => return None,
    };
    Some(named)
}
