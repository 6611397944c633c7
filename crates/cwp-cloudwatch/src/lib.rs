//! cwp-cloudwatch
//!
//! CloudWatch-backed [`AlarmBackend`]. One `DescribeAlarms` per existence
//! check and one `DeleteAlarms` per delete, each scoped to a single alarm
//! name even though the API accepts batches.
//!
//! Profile and region come from an explicit [`TargetConfig`]; nothing is read
//! from process-global flags.

use aws_config::{BehaviorVersion, Region, SdkConfig};
use aws_credential_types::provider::ProvideCredentials;
use aws_sdk_cloudwatch::error::DisplayErrorContext;
use aws_sdk_cloudwatch::operation::describe_alarms::DescribeAlarmsOutput;
use aws_sdk_cloudwatch::types::AlarmType;
use aws_sdk_cloudwatch::Client;
use cwp_config::{AlarmName, TargetConfig};
use cwp_reconcile::{AlarmBackend, BackendError, BackendOperation};

#[derive(Debug, Clone)]
pub struct CloudWatchBackend {
    client: Client,
    target: TargetConfig,
}

impl CloudWatchBackend {
    /// Load the shared AWS config for `target` and make sure credentials
    /// resolve before any alarm is touched.
    pub async fn connect(target: &TargetConfig) -> Result<Self, BackendError> {
        let sdk_config = load_sdk_config(target).await;
        verify_credentials(&sdk_config, target).await?;

        tracing::info!(
            profile = %target.profile,
            region = %target.region,
            "cloudwatch client ready"
        );

        Ok(Self {
            client: Client::new(&sdk_config),
            target: target.clone(),
        })
    }

    /// Wrap an already-built client (custom endpoints, local stacks).
    pub fn from_client(client: Client, target: TargetConfig) -> Self {
        Self { client, target }
    }
}

async fn load_sdk_config(target: &TargetConfig) -> SdkConfig {
    aws_config::defaults(BehaviorVersion::latest())
        .profile_name(&target.profile)
        .region(Region::new(target.region.clone()))
        .load()
        .await
}

async fn verify_credentials(
    sdk_config: &SdkConfig,
    target: &TargetConfig,
) -> Result<(), BackendError> {
    let provider = sdk_config.credentials_provider().ok_or_else(|| {
        BackendError::Credentials(format!(
            "no credentials provider for profile {} in region {}",
            target.profile, target.region
        ))
    })?;

    provider.provide_credentials().await.map_err(|e| {
        BackendError::Credentials(format!(
            "unable to load credentials for profile {} in region {}: {}",
            target.profile,
            target.region,
            DisplayErrorContext(&e)
        ))
    })?;

    Ok(())
}

/// True when the response holds at least one metric or composite alarm.
pub fn response_has_alarm(out: &DescribeAlarmsOutput) -> bool {
    !out.metric_alarms().is_empty() || !out.composite_alarms().is_empty()
}

#[async_trait::async_trait]
impl AlarmBackend for CloudWatchBackend {
    fn name(&self) -> &'static str {
        "cloudwatch"
    }

    async fn alarm_exists(&self, alarm: &AlarmName) -> Result<bool, BackendError> {
        tracing::debug!(alarm = %alarm, profile = %self.target.profile, "DescribeAlarms");

        // Without AlarmTypes the API only returns metric alarms.
        let out = self
            .client
            .describe_alarms()
            .alarm_names(alarm.as_str())
            .alarm_types(AlarmType::MetricAlarm)
            .alarm_types(AlarmType::CompositeAlarm)
            .send()
            .await
            .map_err(|e| {
                BackendError::request(
                    BackendOperation::DescribeAlarms,
                    alarm,
                    DisplayErrorContext(&e).to_string(),
                )
            })?;

        let exists = response_has_alarm(&out);
        tracing::debug!(
            alarm = %alarm,
            metric_alarms = out.metric_alarms().len(),
            composite_alarms = out.composite_alarms().len(),
            exists,
            "DescribeAlarms result"
        );
        Ok(exists)
    }

    async fn delete_alarm(&self, alarm: &AlarmName) -> Result<(), BackendError> {
        tracing::debug!(alarm = %alarm, profile = %self.target.profile, "DeleteAlarms");

        self.client
            .delete_alarms()
            .alarm_names(alarm.as_str())
            .send()
            .await
            .map_err(|e| {
                BackendError::request(
                    BackendOperation::DeleteAlarms,
                    alarm,
                    DisplayErrorContext(&e).to_string(),
                )
            })?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aws_sdk_cloudwatch::types::{CompositeAlarm, MetricAlarm};

    #[test]
    fn empty_response_means_missing() {
        let out = DescribeAlarmsOutput::builder().build();
        assert!(!response_has_alarm(&out));
    }

    #[test]
    fn metric_alarm_means_present() {
        let out = DescribeAlarmsOutput::builder()
            .metric_alarms(MetricAlarm::builder().alarm_name("api-5xx").build())
            .build();
        assert!(response_has_alarm(&out));
    }

    #[test]
    fn composite_alarm_means_present() {
        let out = DescribeAlarmsOutput::builder()
            .composite_alarms(CompositeAlarm::builder().alarm_name("service-health").build())
            .build();
        assert!(response_has_alarm(&out));
    }

    #[test]
    fn from_client_wraps_given_client() {
        let conf = aws_sdk_cloudwatch::Config::builder()
            .behavior_version(BehaviorVersion::latest())
            .region(Region::new("eu-west-1"))
            .build();
        let target = TargetConfig::resolve("currentsite-prod", "eu-west-1");
        let backend = CloudWatchBackend::from_client(Client::from_conf(conf), target);
        assert_eq!(backend.name(), "cloudwatch");
        assert_eq!(backend.target.profile, "currentsite-prod");
        assert_eq!(backend.target.region, "eu-west-1");
    }
}
