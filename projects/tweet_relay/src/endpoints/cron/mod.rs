pub mod update_tweet_data;
pub mod update_user_data;
