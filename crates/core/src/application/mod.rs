// Application Layer - Use Cases and Business Logic

mod deadline;
pub mod notifier;
pub mod options;
pub mod project_accessor;
pub mod project_service;
pub mod task_service;


// Re-exports
pub use deadline::with_request_deadline;
pub use notifier::EventNotifier;
pub use options::{PublishMode, ServiceOptions};
pub use project_accessor::ProjectServiceAccessor;
pub use project_service::ProjectService;
pub use task_service::TaskService;
