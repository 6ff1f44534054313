use super::state::Screen;

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Quit,
    NextScreen,
    PrevScreen,
    SetScreen(Screen),
    SidebarUp,
    SidebarDown,

    ListUp,
    ListDown,
    GoTop,
    GoBottom,
    PageUp,
    PageDown,
    Activate,
    Refresh,

    CarouselNext,
    CarouselPrev,
    PlayCarouselSlide,

    TogglePause,
    VolumeUp,
    VolumeDown,
    ToggleMute,
    SeekForward,
    SeekBack,
    PlayNext,
    PlayPrev,

    // Seek gesture: keyboard steps the bar, mouse sets it by fraction
    BeginSeek,
    SeekBarStep(f64),
    SeekBarTo(f64),
    CommitSeek,

    LyricsScroll(isize),
    LyricsClickRow(usize),
    SeekToCenterLine,

    SongFocusNext,
    StartComment,
    ReloadComments,

    InputChar(char),
    Backspace,
    Submit,
    Cancel,
    AccountFieldNext,
    ToggleAccountMode,
    Logout,

    DismissAlert,
    Resize,
}
