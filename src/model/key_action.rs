//! Domain-level keyboard actions independent of key bindings.

/// Actions the interactive view understands.
///
/// These represent user intent, not specific keys. The mapping from
/// crossterm::event::KeyEvent to KeyAction is handled by KeyBindings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyAction {
    // Metric selector
    /// Switch to the next metric (Send → Receive → Send+Receive). Default: m/Tab
    NextMetric,
    /// Switch to the previous metric. Default: M/Shift+Tab
    PrevMetric,

    // Threshold slider
    /// Raise the minimum edge weight by one. Default: +/=/l/→
    RaiseThreshold,
    /// Lower the minimum edge weight by one. Default: -/h/←
    LowerThreshold,

    // Node slider
    /// Select the next node in identifier order. Default: j/↓
    NextNode,
    /// Select the previous node in identifier order. Default: k/↑
    PrevNode,
    /// Select the worst node by the current metric. Default: g/Home
    SelectWorst,
    /// Clear the node selection and show every edge. Default: Esc
    ClearSelection,

    // Application
    /// Toggle the help overlay. Default: ?
    Help,
    /// Exit the application. Default: q/Ctrl+c
    Quit,
}
