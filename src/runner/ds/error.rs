use thiserror::Error;

/// The three directive combinations a definition may not declare together.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirectiveConflict {
    ExtendAndOverride,
    OverrideSingleton,
    AbstractSingleton,
}

impl DirectiveConflict {
    fn message(&self) -> &'static str {
        match self {
            DirectiveConflict::ExtendAndOverride => {
                "Cannot extend and override a class at the same time!"
            }
            DirectiveConflict::OverrideSingleton => {
                "Overriding a class and making it singleton is not allowed!"
            }
            DirectiveConflict::AbstractSingleton => "Singleton classes cannot be abstract!",
        }
    }
}

impl std::fmt::Display for DirectiveConflict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

/// Every failure the engine reports. All of them abort the current
/// definition or creation call; none is retried.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ClassError {
    #[error("Class {0} is already defined")]
    Redefinition(String),

    #[error("{0} is undefined!")]
    UndefinedParent(String),

    #[error("Class {0} is not defined to be overridden!")]
    UndefinedOverrideTarget(String),

    #[error("Class {0} is not defined")]
    UnknownClass(String),

    #[error("{0}")]
    Conflict(DirectiveConflict),

    #[error("Cannot instantiate abstract class {0}")]
    AbstractInstantiation(String),

    #[error(
        "Unable to instantiate from [{0}] Have you defined the class or included in the requires:[] property?"
    )]
    UnresolvableReference(String),

    #[error(
        "Automatic property definition of {0} cannot be a function, an object, or an array!\nPlease assign \"null\" to the definitions and initialize it as you require in the init function."
    )]
    InvalidAutoProperty(String),

    #[error("Invalid class definition parameters: {0}")]
    InvalidDefinition(String),

    #[error("Unable to instantiate {0}")]
    UndefinedMixin(String),

    #[error("{class}.{method} has no parent implementation to call")]
    MissingParentMethod { class: String, method: String },

    #[error("{class}.{method} is not a function")]
    MethodNotFound { class: String, method: String },

    #[error("Unable to load [{name}] automatically: {reason}")]
    Load { name: String, reason: String },

    #[error("config error: {0}")]
    Config(String),

    #[error("type error: {0}")]
    Type(String),
}
