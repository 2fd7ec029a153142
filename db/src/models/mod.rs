pub mod archived_channel;
pub mod archived_message;
pub mod archived_role;
pub mod archived_user;
pub mod category;
pub mod feedback;
pub mod guild;
pub mod question_answer;
pub mod ticket;

pub use archived_channel::Entity as ArchivedChannel;
pub use archived_message::Entity as ArchivedMessage;
pub use archived_role::Entity as ArchivedRole;
pub use archived_user::Entity as ArchivedUser;
pub use category::Entity as Category;
pub use feedback::Entity as Feedback;
pub use guild::Entity as Guild;
pub use question_answer::Entity as QuestionAnswer;
pub use ticket::Entity as Ticket;
