pub mod lighting;
pub mod render_loop;
