pub mod spec;

pub use spec::{ChartSource, ComponentRef, NodeRef, QudittoDeploySpec, QudittoSetup};
