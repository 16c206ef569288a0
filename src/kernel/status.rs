use core::fmt;
use spin::Mutex;

/// Kernel initialization status tracking
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitStatus {
    NotStarted,
    InProgress,
    Completed,
    Failed(&'static str),
}

/// Boot components, in the order they are brought up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Component {
    DescriptorTables,
    InterruptController,
    Display,
    Input,
}

impl Component {
    pub const ALL: [Component; 4] = [
        Component::DescriptorTables,
        Component::InterruptController,
        Component::Display,
        Component::Input,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Component::DescriptorTables => "Descriptor Tables",
            Component::InterruptController => "Interrupt Controller",
            Component::Display => "Display",
            Component::Input => "Input Devices",
        }
    }

    fn slot(self) -> usize {
        self as usize
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BootStatus {
    components: [InitStatus; 4],
}

impl BootStatus {
    pub const fn new() -> Self {
        Self {
            components: [InitStatus::NotStarted; 4],
        }
    }

    pub fn get(&self, component: Component) -> InitStatus {
        self.components[component.slot()]
    }

    pub fn set(&mut self, component: Component, status: InitStatus) {
        self.components[component.slot()] = status;
    }

    /// Check if all components are initialized
    pub fn all_ready(&self) -> bool {
        self.components.iter().all(|s| matches!(s, InitStatus::Completed))
    }

    pub fn first_failure(&self) -> Option<(Component, &'static str)> {
        Component::ALL.iter().find_map(|&c| match self.get(c) {
            InitStatus::Failed(e) => Some((c, e)),
            _ => None,
        })
    }
}

impl Default for BootStatus {
    fn default() -> Self {
        Self::new()
    }
}

/// Status of the running kernel's boot.
pub static BOOT_STATUS: Mutex<BootStatus> = Mutex::new(BootStatus::new());

pub fn all_components_ready() -> bool {
    BOOT_STATUS.lock().all_ready()
}

impl fmt::Display for InitStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InitStatus::NotStarted => write!(f, "Not Started"),
            InitStatus::InProgress => write!(f, "In Progress"),
            InitStatus::Completed => write!(f, "Completed"),
            InitStatus::Failed(err) => write!(f, "Failed: {}", err),
        }
    }
}
