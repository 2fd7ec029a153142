pub mod m202601050001_create_guilds;
pub mod m202601050002_create_categories;
pub mod m202601050003_create_tickets;
pub mod m202601050004_create_archived_users;
pub mod m202601050005_create_archived_channels;
pub mod m202601050006_create_archived_roles;
pub mod m202601050007_create_archived_messages;
pub mod m202601050008_create_feedback;
pub mod m202601050009_create_question_answers;
