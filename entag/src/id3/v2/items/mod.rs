mod attached_picture_frame;
mod binary_frame;
mod comment_frame;
mod text_information_frame;

pub use attached_picture_frame::AttachedPictureFrame;
pub use binary_frame::BinaryFrame;
pub use comment_frame::CommentFrame;
pub use text_information_frame::TextInformationFrame;
