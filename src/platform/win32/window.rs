// ── Main window ───────────────────────────────────────────────────────────────
//
// Responsibilities in this file (unsafe confined here):
//   • Register the main window class and create the top-level window.
//   • Build the menu bar, the toolbar row, the RichEdit pad and the status bar.
//   • Run the Win32 message loop with keyboard accelerators.
//   • Dispatch WM_COMMAND, WM_SIZE, WM_DPICHANGED, WM_CLOSE, WM_DESTROY.
//
// ── State ownership ───────────────────────────────────────────────────────────
//
// `WindowState` is boxed inside a `RefCell` and stored in GWLP_USERDATA after
// the children exist.  The box is reclaimed in WM_NCDESTROY.  Messages that
// arrive while a handler already holds the borrow (EN_CHANGE sent by
// `set_text`, anything pumped by a modal dialog) get default processing.

#![allow(unsafe_code)]

use std::{cell::RefCell, path::PathBuf};

use windows::{
    core::{w, PCWSTR},
    Win32::{
        Foundation::{
            GetLastError, BOOL, HINSTANCE, HWND, LPARAM, LRESULT, RECT, TRUE, WPARAM,
        },
        Graphics::Gdi::{GetStockObject, GetSysColorBrush, UpdateWindow, COLOR_BTNFACE, DEFAULT_GUI_FONT},
        System::LibraryLoader::GetModuleHandleW,
        UI::{
            Controls::{InitCommonControlsEx, ICC_BAR_CLASSES, ICC_UPDOWN_CLASS, INITCOMMONCONTROLSEX},
            HiDpi::{
                GetDpiForSystem, GetDpiForWindow, SetProcessDpiAwarenessContext,
                DPI_AWARENESS_CONTEXT_PER_MONITOR_AWARE_V2,
            },
            Input::KeyboardAndMouse::SetFocus,
            WindowsAndMessaging::{
                AppendMenuW, CheckMenuItem, CreateAcceleratorTableW, CreateMenu,
                CreateWindowExW, DefWindowProcW, DestroyAcceleratorTable, DestroyWindow,
                DispatchMessageW, GetClientRect, GetMenu, GetMessageW, GetWindowLongPtrW,
                GetWindowRect, LoadCursorW, LoadIconW, MoveWindow, PostQuitMessage,
                RegisterClassExW, SendMessageW, SetMenu, SetWindowLongPtrW, SetWindowPos,
                SetWindowTextW, ShowWindow, TranslateAcceleratorW, TranslateMessage, ACCEL,
                CS_HREDRAW, CS_VREDRAW, CW_USEDEFAULT, FCONTROL, FSHIFT, FVIRTKEY,
                GWLP_USERDATA, HACCEL, HMENU, IDC_ARROW, IDI_APPLICATION, MF_CHECKED, MF_POPUP,
                MF_SEPARATOR, MF_STRING, MF_UNCHECKED, MSG, SWP_NOACTIVATE, SWP_NOZORDER,
                SW_SHOW, WINDOW_EX_STYLE, WINDOW_STYLE, WM_CLOSE, WM_COMMAND, WM_DESTROY,
                WM_DPICHANGED, WM_NCDESTROY, WM_SETFOCUS, WM_SETFONT, WM_SIZE, WNDCLASSEXW,
                WS_CHILD, WS_CLIPCHILDREN, WS_EX_CLIENTEDGE, WS_GROUP, WS_OVERLAPPEDWINDOW,
                WS_TABSTOP, WS_VISIBLE,
            },
        },
    },
};

use super::dialogs::{
    ask_save_changes, choose_color, open_url, show_file_error, show_info, show_open_dialog,
    show_save_dialog, wide, CustomColors, SaveChoice,
};
use crate::{
    app::{App, APP_NAME, APP_VERSION},
    editor::richedit::{
        messages::{
            BM_SETCHECK, BN_CLICKED, BST_CHECKED, BS_AUTORADIOBUTTON, BS_PUSHBUTTON, EN_CHANGE,
            ES_NUMBER, SBARS_SIZEGRIP, SB_SETPARTS, SB_SETTEXTW, SS_CENTERIMAGE, UDM_GETPOS32,
            UDM_SETBUDDY, UDM_SETPOS32, UDM_SETRANGE32, UDS_ALIGNRIGHT, UDS_ARROWKEYS,
            UDS_NOTHOUSANDS, UDS_SETBUDDYINT,
        },
        RichEditDll, RichEditView,
    },
    error::{LimitpadError, Result},
    highlight::{LimitMode, MAX_LIMIT},
    settings,
    stats::TextStats,
    ui::layout::{scale, status_parts, Layout, Rect, BASE_DPI},
};

// ── Window identity ───────────────────────────────────────────────────────────

/// Atom name used to register (and later find) the main window class.
const CLASS_NAME: PCWSTR = w!("LimitpadMainWindow");

/// Default window size at 96 DPI.
const DEFAULT_WIDTH: i32 = 640;
const DEFAULT_HEIGHT: i32 = 480;

const RELEASES_URL: &str = "https://publicdomaingift.com";
const SOURCE_URL: &str = "https://github.com/publicdomain/limitpad";

// ── Menu command IDs ──────────────────────────────────────────────────────────

const IDM_FILE_NEW: usize = 1001;
const IDM_FILE_OPEN: usize = 1002;
const IDM_FILE_SAVE: usize = 1003;
const IDM_FILE_SAVE_AS: usize = 1004;
const IDM_FILE_EXIT: usize = 1005;

const IDM_EDIT_CUT: usize = 2001;
const IDM_EDIT_COPY: usize = 2002;
const IDM_EDIT_PASTE: usize = 2003;
const IDM_EDIT_SELECT_ALL: usize = 2004;

const IDM_OPTIONS_REMEMBER_TEXT: usize = 3001;

const IDM_HELP_RELEASES: usize = 9001;
const IDM_HELP_SOURCE: usize = 9002;
const IDM_HELP_ABOUT: usize = 9003;

// ── Child control IDs ─────────────────────────────────────────────────────────

const IDC_PAD: usize = 100;
const IDC_LIMIT_EDIT: usize = 101;
const IDC_LIMIT_SPIN: usize = 102;
const IDC_CHARACTERS: usize = 103;
const IDC_WORDS: usize = 104;
const IDC_PRE_COLOR: usize = 105;
const IDC_POST_COLOR: usize = 106;
const IDC_STATUS: usize = 107;
const IDC_LIMIT_LABEL: usize = 108;

// ── Public API ────────────────────────────────────────────────────────────────

/// Create the main window and drive the message loop until the user closes
/// the application.
pub(crate) fn run() -> Result<()> {
    #[cfg(debug_assertions)]
    let t0 = std::time::Instant::now();

    init_dpi_awareness();
    init_common_controls()?;

    // SAFETY: GetModuleHandleW(None) returns the .exe's own HMODULE, which is
    // valid for the process lifetime.
    let hmodule = unsafe { GetModuleHandleW(None) }?;
    let hinstance = HINSTANCE(hmodule.0);

    let settings_path = settings::settings_path();
    let app = App::new(settings::load_or_create(&settings_path));

    register_class(hinstance)?;
    let accel = create_accelerators()?;
    let hwnd = create_window(hinstance, app.settings.remember_text)?;

    let state = match WindowState::build(hwnd, hinstance, app, settings_path) {
        Ok(state) => state,
        Err(e) => {
            // SAFETY: hwnd was created above and holds no user data yet.
            unsafe {
                let _ = DestroyWindow(hwnd);
            }
            return Err(e);
        }
    };
    state.layout();
    state.refresh();
    state.update_title();

    let raw = Box::into_raw(Box::new(RefCell::new(state)));
    // SAFETY: hwnd is valid; ownership of the box passes to the window and is
    // taken back in WM_NCDESTROY.
    unsafe {
        SetWindowLongPtrW(hwnd, GWLP_USERDATA, raw as isize);
        let _ = ShowWindow(hwnd, SW_SHOW);
        let _ = UpdateWindow(hwnd);
    }

    #[cfg(debug_assertions)]
    log::debug!("window visible in {:.1} ms", t0.elapsed().as_secs_f64() * 1000.0);

    let result = message_loop(hwnd, accel);
    // SAFETY: accel came from CreateAcceleratorTableW and is no longer used.
    unsafe {
        let _ = DestroyAcceleratorTable(accel);
    }
    result
}

// ── Process setup ─────────────────────────────────────────────────────────────

/// Opt into Per-Monitor v2 DPI awareness.
/// MUST be called before any window is created.
fn init_dpi_awareness() {
    // SAFETY: single call at process start, before window creation.
    if let Err(e) = unsafe { SetProcessDpiAwarenessContext(DPI_AWARENESS_CONTEXT_PER_MONITOR_AWARE_V2) } {
        log::warn!("per-monitor DPI awareness unavailable: {e}");
    }
}

/// Register the status-bar and up-down window classes.
fn init_common_controls() -> Result<()> {
    let icc = INITCOMMONCONTROLSEX {
        dwSize: std::mem::size_of::<INITCOMMONCONTROLSEX>() as u32,
        dwICC: ICC_BAR_CLASSES | ICC_UPDOWN_CLASS,
    };
    // SAFETY: icc is fully initialised with dwSize set.
    if !unsafe { InitCommonControlsEx(&icc) }.as_bool() {
        return Err(last_error("InitCommonControlsEx"));
    }
    Ok(())
}

fn dpi_for_window(hwnd: HWND) -> u32 {
    // SAFETY: hwnd is a valid window handle.
    match unsafe { GetDpiForWindow(hwnd) } {
        0 => BASE_DPI,
        v => v,
    }
}

fn system_dpi() -> u32 {
    // SAFETY: no parameters; always succeeds on Windows 10+.
    match unsafe { GetDpiForSystem() } {
        0 => BASE_DPI,
        v => v,
    }
}

// ── Window class registration ─────────────────────────────────────────────────

fn register_class(hinstance: HINSTANCE) -> Result<()> {
    // SAFETY: IDI_APPLICATION and IDC_ARROW are built-in resources.
    let icon = unsafe { LoadIconW(None, IDI_APPLICATION) }?;
    let cursor = unsafe { LoadCursorW(None, IDC_ARROW) }?;

    let wndclass = WNDCLASSEXW {
        cbSize: std::mem::size_of::<WNDCLASSEXW>() as u32,
        style: CS_HREDRAW | CS_VREDRAW,
        lpfnWndProc: Some(wnd_proc),
        cbClsExtra: 0,
        cbWndExtra: 0,
        hInstance: hinstance,
        hIcon: icon,
        hCursor: cursor,
        // SAFETY: GetSysColorBrush returns a shared system brush that must not
        // be freed; the class only borrows it.
        hbrBackground: unsafe { GetSysColorBrush(COLOR_BTNFACE) },
        lpszMenuName: PCWSTR::null(),
        lpszClassName: CLASS_NAME,
        hIconSm: icon,
    };

    // SAFETY: wndclass is fully initialised; CLASS_NAME is a static literal.
    if unsafe { RegisterClassExW(&wndclass) } == 0 {
        return Err(last_error("RegisterClassExW"));
    }
    Ok(())
}

// ── Window creation ───────────────────────────────────────────────────────────

fn create_window(hinstance: HINSTANCE, remember_text: bool) -> Result<HWND> {
    let dpi = system_dpi();
    let title = wide(APP_NAME);

    // SAFETY: CLASS_NAME was just registered; title outlives the call.  A null
    // parent creates a top-level window; the menu is attached below.
    let hwnd = unsafe {
        CreateWindowExW(
            WINDOW_EX_STYLE(0),
            CLASS_NAME,
            PCWSTR(title.as_ptr()),
            WS_OVERLAPPEDWINDOW | WS_CLIPCHILDREN,
            CW_USEDEFAULT,
            CW_USEDEFAULT,
            scale(DEFAULT_WIDTH, dpi),
            scale(DEFAULT_HEIGHT, dpi),
            HWND::default(),
            HMENU::default(),
            hinstance,
            None,
        )
    }?;

    let menu = build_menu(remember_text)?;
    // SAFETY: hwnd and menu are valid handles.
    unsafe { SetMenu(hwnd, menu) }?;

    Ok(hwnd)
}

/// Create one child control with no size; `layout` positions it.
fn create_child(
    parent: HWND,
    hinstance: HINSTANCE,
    ex_style: WINDOW_EX_STYLE,
    class: PCWSTR,
    text: PCWSTR,
    style: WINDOW_STYLE,
    id: usize,
) -> Result<HWND> {
    // SAFETY: class names are system classes registered by user32/comctl32;
    // parent and hinstance are valid.  For a child window the HMENU
    // parameter carries the control id.
    let hwnd = unsafe {
        CreateWindowExW(
            ex_style,
            class,
            text,
            WS_CHILD | WS_VISIBLE | style,
            0, 0, 0, 0,
            parent,
            HMENU(id as *mut core::ffi::c_void),
            hinstance,
            None,
        )
    }?;
    Ok(hwnd)
}

// ── Menu construction ─────────────────────────────────────────────────────────

fn build_menu(remember_text: bool) -> Result<HMENU> {
    let remember_flag = if remember_text { MF_CHECKED } else { MF_UNCHECKED };

    // SAFETY: every HMENU comes from a successful CreateMenu; labels are static
    // literals.  Sub-menus are owned by the bar once appended.
    unsafe {
        let bar = CreateMenu()?;

        let file = CreateMenu()?;
        AppendMenuW(file, MF_STRING, IDM_FILE_NEW, w!("&New\tCtrl+N"))?;
        AppendMenuW(file, MF_STRING, IDM_FILE_OPEN, w!("&Open...\tCtrl+O"))?;
        AppendMenuW(file, MF_STRING, IDM_FILE_SAVE, w!("&Save\tCtrl+S"))?;
        AppendMenuW(file, MF_STRING, IDM_FILE_SAVE_AS, w!("Save &As...\tCtrl+Shift+S"))?;
        AppendMenuW(file, MF_SEPARATOR, 0, PCWSTR::null())?;
        AppendMenuW(file, MF_STRING, IDM_FILE_EXIT, w!("E&xit\tAlt+F4"))?;

        let edit = CreateMenu()?;
        AppendMenuW(edit, MF_STRING, IDM_EDIT_CUT, w!("Cu&t\tCtrl+X"))?;
        AppendMenuW(edit, MF_STRING, IDM_EDIT_COPY, w!("&Copy\tCtrl+C"))?;
        AppendMenuW(edit, MF_STRING, IDM_EDIT_PASTE, w!("&Paste\tCtrl+V"))?;
        AppendMenuW(edit, MF_SEPARATOR, 0, PCWSTR::null())?;
        AppendMenuW(edit, MF_STRING, IDM_EDIT_SELECT_ALL, w!("Select &All\tCtrl+A"))?;

        let options = CreateMenu()?;
        AppendMenuW(
            options,
            MF_STRING | remember_flag,
            IDM_OPTIONS_REMEMBER_TEXT,
            w!("&Remember text"),
        )?;

        let help = CreateMenu()?;
        AppendMenuW(help, MF_STRING, IDM_HELP_RELEASES, w!("&More releases"))?;
        AppendMenuW(help, MF_STRING, IDM_HELP_SOURCE, w!("&Source code"))?;
        AppendMenuW(help, MF_SEPARATOR, 0, PCWSTR::null())?;
        AppendMenuW(help, MF_STRING, IDM_HELP_ABOUT, w!("&About Limitpad..."))?;

        // For MF_POPUP the item id is the child HMENU.
        AppendMenuW(bar, MF_POPUP, file.0 as usize, w!("&File"))?;
        AppendMenuW(bar, MF_POPUP, edit.0 as usize, w!("&Edit"))?;
        AppendMenuW(bar, MF_POPUP, options.0 as usize, w!("&Options"))?;
        AppendMenuW(bar, MF_POPUP, help.0 as usize, w!("&Help"))?;

        Ok(bar)
    }
}

fn create_accelerators() -> Result<HACCEL> {
    let ctrl = FVIRTKEY | FCONTROL;
    let table = [
        ACCEL { fVirt: ctrl, key: u16::from(b'N'), cmd: IDM_FILE_NEW as u16 },
        ACCEL { fVirt: ctrl, key: u16::from(b'O'), cmd: IDM_FILE_OPEN as u16 },
        ACCEL { fVirt: ctrl, key: u16::from(b'S'), cmd: IDM_FILE_SAVE as u16 },
        ACCEL { fVirt: ctrl | FSHIFT, key: u16::from(b'S'), cmd: IDM_FILE_SAVE_AS as u16 },
    ];
    // SAFETY: table is a valid ACCEL slice; the system copies it.
    let accel = unsafe { CreateAcceleratorTableW(&table) }?;
    Ok(accel)
}

// ── Message loop ──────────────────────────────────────────────────────────────

fn message_loop(hwnd: HWND, accel: HACCEL) -> Result<()> {
    let mut msg = MSG::default();

    loop {
        // SAFETY: &mut msg is a valid MSG pointer; a null HWND retrieves
        // messages for every window on this thread.
        let ret = unsafe { GetMessageW(&mut msg, HWND::default(), 0, 0) };

        match ret.0 {
            -1 => return Err(last_error("GetMessageW")),
            // WM_QUIT
            0 => break,
            // SAFETY: msg was populated by a successful GetMessageW call.
            _ => unsafe {
                if TranslateAcceleratorW(hwnd, accel, &msg) == 0 {
                    let _ = TranslateMessage(&msg);
                    DispatchMessageW(&msg);
                }
            },
        }
    }

    Ok(())
}

// ── Window procedure ──────────────────────────────────────────────────────────

/// What the window procedure does after a handler returns.
enum Handled {
    /// Return this value.
    Done(LRESULT),
    /// Pass the message to `DefWindowProcW`.
    Default,
    /// Destroy the window (after the state borrow is released).
    Destroy,
}

// SAFETY: wnd_proc is registered as lpfnWndProc in WNDCLASSEXW.  Windows
// guarantees that hwnd, msg, wparam and lparam are valid for this call.
unsafe extern "system" fn wnd_proc(
    hwnd: HWND,
    msg: u32,
    wparam: WPARAM,
    lparam: LPARAM,
) -> LRESULT {
    match msg {
        WM_DESTROY => {
            PostQuitMessage(0);
            return LRESULT(0);
        }
        WM_NCDESTROY => {
            let raw = SetWindowLongPtrW(hwnd, GWLP_USERDATA, 0) as *mut RefCell<WindowState>;
            if !raw.is_null() {
                // SAFETY: raw came from Box::into_raw in run() and is cleared
                // above, so it is reclaimed exactly once.
                drop(Box::from_raw(raw));
            }
            return DefWindowProcW(hwnd, msg, wparam, lparam);
        }
        _ => {}
    }

    let raw = GetWindowLongPtrW(hwnd, GWLP_USERDATA) as *const RefCell<WindowState>;
    if raw.is_null() {
        return DefWindowProcW(hwnd, msg, wparam, lparam);
    }

    // SAFETY: a non-null user-data pointer is the live box from run(); it is
    // only freed in WM_NCDESTROY, which cannot run while this frame uses it.
    let handled = match (*raw).try_borrow_mut() {
        Ok(mut state) => state.handle(msg, wparam, lparam),
        Err(_) => Handled::Default,
    };

    match handled {
        Handled::Done(result) => result,
        Handled::Default => DefWindowProcW(hwnd, msg, wparam, lparam),
        Handled::Destroy => {
            let _ = DestroyWindow(hwnd);
            LRESULT(0)
        }
    }
}

fn loword(v: usize) -> usize {
    v & 0xFFFF
}

fn hiword(v: usize) -> u32 {
    ((v >> 16) & 0xFFFF) as u32
}

// ── Window state ──────────────────────────────────────────────────────────────

/// Toolbar and status-bar handles.  Destroyed with the main window.
struct Controls {
    limit_label: HWND,
    limit_edit: HWND,
    limit_spin: HWND,
    characters: HWND,
    words: HWND,
    pre_button: HWND,
    post_button: HWND,
    status: HWND,
}

impl Controls {
    fn create(parent: HWND, hinstance: HINSTANCE) -> Result<Self> {
        let plain = WINDOW_EX_STYLE(0);
        let child = |ex, class, text, style, id| {
            create_child(parent, hinstance, ex, class, text, style, id)
        };

        let limit_label = child(
            plain,
            w!("STATIC"),
            w!("Limit:"),
            WINDOW_STYLE(SS_CENTERIMAGE),
            IDC_LIMIT_LABEL,
        )?;
        let limit_edit = child(
            WS_EX_CLIENTEDGE,
            w!("EDIT"),
            PCWSTR::null(),
            WS_TABSTOP | WINDOW_STYLE(ES_NUMBER),
            IDC_LIMIT_EDIT,
        )?;
        let limit_spin = child(
            plain,
            w!("msctls_updown32"),
            PCWSTR::null(),
            WINDOW_STYLE(UDS_SETBUDDYINT | UDS_ALIGNRIGHT | UDS_ARROWKEYS | UDS_NOTHOUSANDS),
            IDC_LIMIT_SPIN,
        )?;
        let characters = child(
            plain,
            w!("BUTTON"),
            w!("Characters"),
            WS_GROUP | WS_TABSTOP | WINDOW_STYLE(BS_AUTORADIOBUTTON),
            IDC_CHARACTERS,
        )?;
        let words = child(
            plain,
            w!("BUTTON"),
            w!("Words"),
            WINDOW_STYLE(BS_AUTORADIOBUTTON),
            IDC_WORDS,
        )?;
        let pre_button = child(
            plain,
            w!("BUTTON"),
            w!("Pre color..."),
            WS_GROUP | WS_TABSTOP | WINDOW_STYLE(BS_PUSHBUTTON),
            IDC_PRE_COLOR,
        )?;
        let post_button = child(
            plain,
            w!("BUTTON"),
            w!("Post color..."),
            WS_TABSTOP | WINDOW_STYLE(BS_PUSHBUTTON),
            IDC_POST_COLOR,
        )?;
        let status = child(
            plain,
            w!("msctls_statusbar32"),
            PCWSTR::null(),
            WINDOW_STYLE(SBARS_SIZEGRIP),
            IDC_STATUS,
        )?;

        Ok(Self {
            limit_label,
            limit_edit,
            limit_spin,
            characters,
            words,
            pre_button,
            post_button,
            status,
        })
    }

    fn all(&self) -> [HWND; 8] {
        [
            self.limit_label,
            self.limit_edit,
            self.limit_spin,
            self.characters,
            self.words,
            self.pre_button,
            self.post_button,
            self.status,
        ]
    }
}

/// Everything the main window owns.
struct WindowState {
    hwnd: HWND,
    app: App,
    settings_path: PathBuf,
    controls: Controls,
    pad: RichEditView,
    /// Declared after `pad` so the DLL outlives the view.
    _dll: RichEditDll,
    custom_colors: CustomColors,
    dpi: u32,
}

impl WindowState {
    /// Create the children and push the loaded settings into them.
    fn build(hwnd: HWND, hinstance: HINSTANCE, app: App, settings_path: PathBuf) -> Result<Self> {
        let dll = RichEditDll::load()?;
        let controls = Controls::create(hwnd, hinstance)?;
        let pad = RichEditView::create(hwnd, hinstance, IDC_PAD, &dll)?;

        // SAFETY: every handle is a live child of hwnd; the stock font is
        // never freed.  The remaining messages take plain integers.
        unsafe {
            let font = GetStockObject(DEFAULT_GUI_FONT);
            for control in controls.all().into_iter().chain([pad.hwnd()]) {
                let _ = SendMessageW(control, WM_SETFONT, WPARAM(font.0 as usize), LPARAM(1));
            }

            let config = app.highlight();
            let radio = match config.mode {
                LimitMode::Characters => controls.characters,
                LimitMode::Words => controls.words,
            };
            let _ = SendMessageW(radio, BM_SETCHECK, WPARAM(BST_CHECKED), LPARAM(0));

            let spin = controls.limit_spin;
            let _ = SendMessageW(spin, UDM_SETBUDDY, WPARAM(controls.limit_edit.0 as usize), LPARAM(0));
            let _ = SendMessageW(spin, UDM_SETRANGE32, WPARAM(0), LPARAM(MAX_LIMIT as isize));
            let _ = SendMessageW(spin, UDM_SETPOS32, WPARAM(0), LPARAM(config.limit as isize));
        }

        if let Some(text) = app.remembered_text() {
            pad.set_text(text);
        }

        Ok(Self {
            hwnd,
            app,
            settings_path,
            controls,
            pad,
            _dll: dll,
            custom_colors: [Default::default(); 16],
            dpi: dpi_for_window(hwnd),
        })
    }

    fn handle(&mut self, msg: u32, wparam: WPARAM, lparam: LPARAM) -> Handled {
        match msg {
            WM_SIZE => {
                self.layout();
                Handled::Done(LRESULT(0))
            }

            WM_DPICHANGED => {
                self.dpi = hiword(wparam.0);
                // SAFETY: for WM_DPICHANGED, lparam points at the suggested
                // window rectangle for the duration of the message.
                unsafe {
                    let r = &*(lparam.0 as *const RECT);
                    let _ = SetWindowPos(
                        self.hwnd,
                        HWND::default(),
                        r.left,
                        r.top,
                        r.right - r.left,
                        r.bottom - r.top,
                        SWP_NOZORDER | SWP_NOACTIVATE,
                    );
                }
                self.layout();
                Handled::Done(LRESULT(0))
            }

            WM_SETFOCUS => {
                // SAFETY: the pad is a live child window.
                unsafe {
                    let _ = SetFocus(self.pad.hwnd());
                }
                Handled::Done(LRESULT(0))
            }

            WM_COMMAND => self.on_command(loword(wparam.0), hiword(wparam.0)),

            WM_CLOSE => self.on_close(),

            _ => Handled::Default,
        }
    }

    // ── Commands ──────────────────────────────────────────────────────────────

    fn on_command(&mut self, id: usize, code: u32) -> Handled {
        match (id, code) {
            (IDC_PAD, EN_CHANGE) => self.on_text_changed(),
            (IDC_LIMIT_EDIT, EN_CHANGE) => self.on_limit_changed(),
            (IDC_CHARACTERS, BN_CLICKED) => self.set_mode(LimitMode::Characters),
            (IDC_WORDS, BN_CLICKED) => self.set_mode(LimitMode::Words),
            (IDC_PRE_COLOR, BN_CLICKED) => self.pick_color(true),
            (IDC_POST_COLOR, BN_CLICKED) => self.pick_color(false),

            (IDM_FILE_NEW, _) => self.new_document(),
            (IDM_FILE_OPEN, _) => self.open(),
            (IDM_FILE_SAVE, _) => {
                self.save(false);
            }
            (IDM_FILE_SAVE_AS, _) => {
                self.save(true);
            }
            (IDM_FILE_EXIT, _) => return self.on_close(),

            // Edits made through the menu notify re-entrantly, while the
            // state is borrowed, so the change is applied here.
            (IDM_EDIT_CUT, _) => {
                self.pad.cut();
                self.on_text_changed();
            }
            (IDM_EDIT_COPY, _) => self.pad.copy_to_clipboard(),
            (IDM_EDIT_PASTE, _) => {
                self.pad.paste();
                self.on_text_changed();
            }
            (IDM_EDIT_SELECT_ALL, _) => self.pad.select_all(),

            (IDM_OPTIONS_REMEMBER_TEXT, _) => self.toggle_remember_text(),

            (IDM_HELP_RELEASES, _) => open_url(self.hwnd, RELEASES_URL),
            (IDM_HELP_SOURCE, _) => open_url(self.hwnd, SOURCE_URL),
            (IDM_HELP_ABOUT, _) => self.about(),

            _ => return Handled::Default,
        }
        Handled::Done(LRESULT(0))
    }

    fn on_text_changed(&mut self) {
        if !self.app.doc.dirty {
            self.app.doc.dirty = true;
            self.update_title();
        }
        self.refresh();
    }

    fn on_limit_changed(&mut self) {
        let mut failed = BOOL(0);
        // SAFETY: the spinner is a live child; lparam points at a BOOL that
        // outlives the call.
        let pos = unsafe {
            SendMessageW(
                self.controls.limit_spin,
                UDM_GETPOS32,
                WPARAM(0),
                LPARAM(&mut failed as *mut BOOL as isize),
            )
            .0
        };
        // Empty or out-of-range text while typing; keep the previous limit.
        let Ok(limit) = u32::try_from(pos) else { return };
        if failed.as_bool() {
            return;
        }
        self.app.highlight_mut().limit = limit;
        self.refresh();
    }

    fn set_mode(&mut self, mode: LimitMode) {
        self.app.highlight_mut().mode = mode;
        self.refresh();
    }

    fn pick_color(&mut self, pre: bool) {
        let config = *self.app.highlight();
        let initial = if pre { config.pre } else { config.post };
        let Some(color) = choose_color(self.hwnd, initial, &mut self.custom_colors) else {
            return;
        };
        let config = self.app.highlight_mut();
        if pre {
            config.pre = color;
        } else {
            config.post = color;
        }
        log::debug!("{} color set to {color}", if pre { "pre" } else { "post" });
        self.refresh();
    }

    fn toggle_remember_text(&mut self) {
        let on = !self.app.settings.remember_text;
        self.app.settings.remember_text = on;
        let flag = if on { MF_CHECKED } else { MF_UNCHECKED };
        // SAFETY: hwnd owns the menu bar; the item id exists in it.
        unsafe {
            CheckMenuItem(GetMenu(self.hwnd), IDM_OPTIONS_REMEMBER_TEXT as u32, flag.0);
        }
    }

    fn about(&self) {
        let body = format!(
            "{APP_NAME} {APP_VERSION}\n\n\
             Colors the text past a character or word limit.\n\n\
             Licensed under CC0 1.0 Universal."
        );
        show_info(self.hwnd, &format!("About {APP_NAME}"), &body);
    }

    // ── Files ─────────────────────────────────────────────────────────────────

    /// `true` when the current text may be replaced or dropped.
    fn confirm_discard(&mut self, closing: bool) -> bool {
        if !self.app.needs_save_prompt(closing) {
            return true;
        }
        match ask_save_changes(self.hwnd, &self.app.doc.display_name()) {
            SaveChoice::Save => self.save(false),
            SaveChoice::Discard => true,
            SaveChoice::Cancel => false,
        }
    }

    fn new_document(&mut self) {
        if !self.confirm_discard(false) {
            return;
        }
        self.app.new_document();
        self.pad.set_text("");
        self.refresh();
        self.update_title();
    }

    fn open(&mut self) {
        if !self.confirm_discard(false) {
            return;
        }
        let Some(path) = show_open_dialog(self.hwnd) else { return };
        match std::fs::read(&path) {
            Ok(bytes) => {
                let text = self.app.open_file(path, &bytes);
                self.pad.set_text(&text);
                self.refresh();
                self.update_title();
            }
            Err(e) => {
                log::error!("could not open {}: {e}", path.display());
                show_file_error(self.hwnd, "Error opening file.", &e);
            }
        }
    }

    /// Save to the current path, or ask for one.  `true` when written.
    fn save(&mut self, save_as: bool) -> bool {
        let current = if save_as { None } else { self.app.doc.path.clone() };
        let Some(path) =
            current.or_else(|| show_save_dialog(self.hwnd, &self.app.doc.display_name()))
        else {
            return false;
        };

        let text = self.pad.text_for_disk();
        match self.app.save(path, &text) {
            Ok(()) => {
                self.update_title();
                true
            }
            Err(e) => {
                log::error!("save failed: {e}");
                show_file_error(self.hwnd, "Error saving file.", &e);
                false
            }
        }
    }

    fn on_close(&mut self) -> Handled {
        if !self.confirm_discard(true) {
            return Handled::Done(LRESULT(0));
        }
        self.persist_settings();
        Handled::Destroy
    }

    fn persist_settings(&mut self) {
        let text = self.pad.text_for_disk();
        self.app.remember(&text);
        if let Err(e) = settings::save_to(&self.settings_path, &self.app.settings) {
            log::error!("could not save settings: {e}");
            show_file_error(self.hwnd, "Error saving settings file.", &e);
        }
    }

    // ── Display ───────────────────────────────────────────────────────────────

    /// Recolour the pad and update the counts.
    fn refresh(&self) {
        let text = self.pad.text_utf16(false);
        match self.pad.recolor(&text, self.app.highlight()) {
            Ok(post) => log::debug!("post range {}..{}", post.start, post.end),
            Err(reason) => log::debug!("colours unchanged: {reason}"),
        }
        let stats = TextStats::of(&text);
        self.set_status(0, &stats.characters_label());
        self.set_status(1, &stats.words_label());
    }

    fn set_status(&self, part: usize, text: &str) {
        let text = wide(text);
        // SAFETY: the status bar is a live child; text outlives the call.
        unsafe {
            let _ = SendMessageW(
                self.controls.status,
                SB_SETTEXTW,
                WPARAM(part),
                LPARAM(text.as_ptr() as isize),
            );
        }
    }

    fn update_title(&self) {
        let title = wide(&self.app.window_title());
        // SAFETY: hwnd valid; title outlives the call.
        unsafe {
            let _ = SetWindowTextW(self.hwnd, PCWSTR(title.as_ptr()));
        }
    }

    /// Position every child for the current client size and DPI.
    fn layout(&self) {
        let status = self.controls.status;
        let mut client = RECT::default();
        let mut status_rect = RECT::default();
        // SAFETY: all handles are live; the RECTs outlive the calls.  The
        // status bar sizes itself when it receives WM_SIZE.
        unsafe {
            let _ = GetClientRect(self.hwnd, &mut client);
            let _ = SendMessageW(status, WM_SIZE, WPARAM(0), LPARAM(0));
            let _ = GetWindowRect(status, &mut status_rect);
        }

        let layout = Layout::compute(
            client.right - client.left,
            client.bottom - client.top,
            status_rect.bottom - status_rect.top,
            self.dpi,
        );

        let c = &self.controls;
        move_to(c.limit_label, layout.limit_label);
        move_to(c.limit_edit, layout.limit_edit);
        move_to(c.characters, layout.characters);
        move_to(c.words, layout.words);
        move_to(c.pre_button, layout.pre_button);
        move_to(c.post_button, layout.post_button);
        move_to(self.pad.hwnd(), layout.pad);

        let parts = status_parts(self.dpi);
        // SAFETY: live children; parts outlives the call.  Re-attaching the
        // buddy re-aligns the spinner to the moved edit.
        unsafe {
            let _ = SendMessageW(
                c.limit_spin,
                UDM_SETBUDDY,
                WPARAM(c.limit_edit.0 as usize),
                LPARAM(0),
            );
            let _ = SendMessageW(
                status,
                SB_SETPARTS,
                WPARAM(parts.len()),
                LPARAM(parts.as_ptr() as isize),
            );
        }
    }
}

fn move_to(hwnd: HWND, r: Rect) {
    // SAFETY: hwnd is a live child window.
    unsafe {
        let _ = MoveWindow(hwnd, r.x, r.y, r.width, r.height, TRUE);
    }
}

// ── Error helpers ─────────────────────────────────────────────────────────────

/// Capture the current Win32 last-error code and wrap it in a `LimitpadError`.
///
/// Call immediately after the failing function; any later API call may
/// overwrite the thread's last-error value.
fn last_error(function: &'static str) -> LimitpadError {
    // SAFETY: GetLastError reads thread-local state and never fails.
    let code = unsafe { GetLastError() };
    LimitpadError::Win32 {
        function,
        code: code.0,
    }
}
