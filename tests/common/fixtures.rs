//! Required-file fixtures

pub const TEMPLATE: &str = "\
AWSTemplateFormatVersion: '2010-09-09'
Parameters:
  NotificationEmail:
    Type: String
  ApiKey:
    Type: String
    NoEcho: true
Resources: {}
";

pub const FUNCTION_SOURCE: &str = "\
import json

def lambda_handler(event, context):
    return {'statusCode': 200, 'body': json.dumps({'message': 'ok'})}
";

pub const DASHBOARD: &str = "<!doctype html><title>AI Infra Monitor</title>\n";

pub const REQUIRED_FILES: [(&str, &str); 3] = [
    ("infrastructure.yaml", TEMPLATE),
    ("lambda_function.py", FUNCTION_SOURCE),
    ("dashboard.html", DASHBOARD),
];
