pub mod configuration;
pub mod configuration_type;
pub mod door;
pub mod door_color;
pub mod door_configuration;
pub mod door_glass;
pub mod door_handle;
pub mod door_hinge;
pub mod door_lock;
pub mod door_mailbox;
pub mod door_mailbox_configuration;
pub mod door_size;
pub mod door_weldorpel;
pub mod order;
pub mod quote;
pub mod setting;
pub mod user;
