// ── Wire-to-domain conversions ──
//
// The backend's DTOs (`flocklink_api::types`) are converted into
// canonical domain types here, in one place. Unknown enum strings
// degrade to defaults rather than failing the whole sync.

use std::str::FromStr;

use flocklink_api::types as wire;

use crate::model::{
    ControllerSummary, EntityId, ExecutionStatus, Farm, IntegrationType, Program, ProgramTask,
    ReportExecution, ReportFrequency, ReportTemplate, RotemDataPoint, RotemFarm, RotemPrediction,
    ScheduledReport, ScrapeLog, TaskPriority, Worker,
};

impl From<wire::FarmResponse> for Farm {
    fn from(r: wire::FarmResponse) -> Self {
        let integration = r
            .integration_type
            .as_deref()
            .and_then(|s| IntegrationType::from_str(s).ok())
            .unwrap_or_default();
        Self {
            id: EntityId::Int(r.id),
            name: r.name,
            location: r.location,
            contact_name: r.contact_name,
            contact_email: r.contact_email,
            contact_phone: r.contact_phone,
            integration,
            integration_status: r.integration_status,
            house_count: r.house_count,
            worker_count: r.worker_count,
        }
    }
}

impl From<wire::WorkerResponse> for Worker {
    fn from(r: wire::WorkerResponse) -> Self {
        Self {
            id: EntityId::Int(r.id),
            farm_id: EntityId::Int(r.farm),
            name: r.name,
            email: r.email,
            phone: r.phone,
            role: r.role,
            is_active: r.is_active,
            receive_daily_tasks: r.receive_daily_tasks,
        }
    }
}

impl From<wire::ProgramTaskResponse> for ProgramTask {
    fn from(r: wire::ProgramTaskResponse) -> Self {
        let priority = r
            .priority
            .as_deref()
            .and_then(|s| TaskPriority::from_str(s).ok())
            .unwrap_or_default();
        Self {
            id: EntityId::Int(r.id),
            day_offset: r.day_offset,
            title: r.title,
            description: r.description,
            priority,
            recurring: r.recurring,
        }
    }
}

impl From<wire::ProgramResponse> for Program {
    fn from(r: wire::ProgramResponse) -> Self {
        Self {
            id: EntityId::Int(r.id),
            name: r.name,
            description: r.description,
            tasks: r.tasks.into_iter().map(ProgramTask::from).collect(),
        }
    }
}

impl From<wire::RotemFarmResponse> for RotemFarm {
    fn from(r: wire::RotemFarmResponse) -> Self {
        Self {
            farm_id: EntityId::Int(r.farm_id),
            gateway_name: r.gateway_name,
            scrape_status: r.scrape_status,
            last_scrape: r.last_scrape,
            success_rate: r.success_rate,
            consecutive_failures: r.consecutive_failures,
        }
    }
}

impl From<wire::RotemDataPointResponse> for RotemDataPoint {
    fn from(r: wire::RotemDataPointResponse) -> Self {
        Self {
            farm_id: EntityId::Int(r.farm_id),
            controller: r.controller,
            metric: r.metric,
            value: r.value,
            recorded_at: r.recorded_at,
        }
    }
}

impl From<wire::RotemPredictionResponse> for RotemPrediction {
    fn from(r: wire::RotemPredictionResponse) -> Self {
        Self {
            farm_id: EntityId::Int(r.farm_id),
            controller: r.controller,
            metric: r.metric,
            predicted_value: r.predicted_value,
            predicted_for: r.predicted_for,
            confidence: r.confidence,
        }
    }
}

impl From<wire::ScrapeLogResponse> for ScrapeLog {
    fn from(r: wire::ScrapeLogResponse) -> Self {
        Self {
            id: EntityId::Int(r.id),
            farm_id: EntityId::Int(r.farm_id),
            started_at: r.started_at,
            finished_at: r.finished_at,
            success: r.success,
            message: r.message,
        }
    }
}

impl From<wire::ControllerSummaryResponse> for ControllerSummary {
    fn from(r: wire::ControllerSummaryResponse) -> Self {
        Self {
            total_farms: r.total_farms,
            active_controllers: r.active_controllers,
            failing_controllers: r.failing_controllers,
            last_updated: r.last_updated,
        }
    }
}

impl From<wire::ReportTemplateResponse> for ReportTemplate {
    fn from(r: wire::ReportTemplateResponse) -> Self {
        Self {
            id: EntityId::Int(r.id),
            name: r.name,
            description: r.description,
            metrics: r.metrics,
        }
    }
}

impl From<wire::ScheduledReportResponse> for ScheduledReport {
    fn from(r: wire::ScheduledReportResponse) -> Self {
        let frequency = ReportFrequency::from_str(&r.frequency).unwrap_or_default();
        Self {
            id: EntityId::Int(r.id),
            template_id: EntityId::Int(r.template),
            frequency,
            recipients: r.recipients,
            enabled: r.enabled,
        }
    }
}

impl From<wire::ReportExecutionResponse> for ReportExecution {
    fn from(r: wire::ReportExecutionResponse) -> Self {
        let status = ExecutionStatus::from_str(&r.status).unwrap_or_default();
        Self {
            id: EntityId::Int(r.id),
            scheduled_report_id: EntityId::Int(r.scheduled_report),
            started_at: r.started_at,
            finished_at: r.finished_at,
            status,
            detail: r.detail,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_integration_type_degrades_to_none() {
        let farm: Farm = wire::FarmResponse {
            id: 1,
            name: "Farm".into(),
            location: None,
            contact_name: None,
            contact_email: None,
            contact_phone: None,
            integration_type: Some("munters".into()),
            integration_status: None,
            house_count: None,
            worker_count: None,
        }
        .into();
        assert_eq!(farm.integration, IntegrationType::None);
    }

    #[test]
    fn rotem_farm_converts_controller_key() {
        let rf: RotemFarm = wire::RotemFarmResponse {
            farm_id: 5,
            gateway_name: "gw-barn-2".into(),
            scrape_status: Some("active".into()),
            last_scrape: None,
            success_rate: Some(0.96),
            consecutive_failures: 0,
        }
        .into();
        assert_eq!(rf.gateway_name, "gw-barn-2");
        assert!(!rf.is_failing());
    }
}
