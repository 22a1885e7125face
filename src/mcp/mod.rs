mod server;

pub use server::EditorServer;
