/// Actions produced by key events
///
/// Draft editing is applied to the state directly and produces no action;
/// everything the app loop or a test may need to observe comes back as one of
/// these.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// Submit the draft (Enter or the Send action)
    Submit,
    /// Open or close the assistant panel
    TogglePanel,
    /// Sidebar width changed to the given number of columns
    Resized { width: u16 },
    /// Transcript scroll position changed
    Scrolled,
    Quit,
}
