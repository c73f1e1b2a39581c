use std::env;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub storage_path: String,
    pub db_path: String,
    pub public_url: String,
    pub google_client_id: String,
    pub google_client_secret: String,
    pub google_redirect_uri: String,
    pub google_project_id: String,
    pub dialogflow_agent_id: String,
    pub dialogflow_language: String,
    pub credentials_path: String,
    pub google_oauth_url: String,
    pub google_calendar_url: String,
    pub dialogflow_url: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        let storage_path = env::var("CALBOT_STORAGE_PATH").unwrap_or("./".to_string());
        let db_path = format!("{}/db", storage_path);
        let public_url =
            env::var("CALBOT_PUBLIC_URL").unwrap_or_else(|_| "http://127.0.0.1:5000".to_string());
        let google_client_id =
            env::var("CALBOT_GOOGLE_CLIENT_ID").expect("Missing CALBOT_GOOGLE_CLIENT_ID");
        let google_client_secret =
            env::var("CALBOT_GOOGLE_CLIENT_SECRET").expect("Missing CALBOT_GOOGLE_CLIENT_SECRET");
        let google_redirect_uri =
            env::var("CALBOT_GOOGLE_REDIRECT_URI").expect("Missing CALBOT_GOOGLE_REDIRECT_URI");
        let google_project_id =
            env::var("CALBOT_GOOGLE_PROJECT_ID").expect("Missing CALBOT_GOOGLE_PROJECT_ID");
        let dialogflow_agent_id =
            env::var("CALBOT_DIALOGFLOW_AGENT_ID").expect("Missing CALBOT_DIALOGFLOW_AGENT_ID");
        let dialogflow_language =
            env::var("CALBOT_DIALOGFLOW_LANGUAGE").unwrap_or_else(|_| "en".to_string());
        let credentials_path = env::var("GOOGLE_APPLICATION_CREDENTIALS")
            .expect("Missing GOOGLE_APPLICATION_CREDENTIALS");
        let google_oauth_url = env::var("CALBOT_GOOGLE_OAUTH_URL")
            .unwrap_or_else(|_| "https://oauth2.googleapis.com".to_string());
        let google_calendar_url = env::var("CALBOT_GOOGLE_CALENDAR_URL")
            .unwrap_or_else(|_| "https://www.googleapis.com/calendar/v3".to_string());
        let dialogflow_url = env::var("CALBOT_DIALOGFLOW_URL")
            .unwrap_or_else(|_| "https://dialogflow.googleapis.com".to_string());

        Self {
            storage_path,
            db_path,
            public_url,
            google_client_id,
            google_client_secret,
            google_redirect_uri,
            google_project_id,
            dialogflow_agent_id,
            dialogflow_language,
            credentials_path,
            google_oauth_url,
            google_calendar_url,
            dialogflow_url,
        }
    }
}
