//! Concrete edit commands.

pub mod add_point;
pub mod delete_rect;
pub mod flip_rotate;
pub mod frames;
pub mod group;
pub mod objects;
pub mod points;
pub mod rescale;
pub mod resize;
pub mod selection;
pub mod set_bitmap;

pub use add_point::{appending_insert_point_command, AddPointCommand, MovePointCommand};
pub use delete_rect::{delete_rect_command_for, DeleteRectCommand};
pub use flip_rotate::{flip_image_command, rotate_image_90_command};
pub use frames::{
    add_frame_command, insert_frame_command, remove_frame_command, reorder_frame_command,
    set_frame_delay_command, set_frame_hotspot_command, swap_frames_command,
};
pub use group::{group_objects_command, ungroup_objects_command};
pub use objects::{AddObjectCommand, DeleteObjectCommand};
pub use points::{offset_objects_command, scale_objects_command, set_points_command, MergeMode};
pub use rescale::rescale_command;
pub use resize::{resize_command, ResizeCommand, ResizeOptions};
pub use selection::{
    move_raster_selection_command, set_raster_selection_appending, set_raster_selection_command,
    stamp_selection_command, MoveRasterSelectionCommand, SetRasterSelectionCommand,
};
pub use set_bitmap::set_bitmap_command;
