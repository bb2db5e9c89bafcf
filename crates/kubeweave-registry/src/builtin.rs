//! Built-in Kubernetes placement table
//!
//! Covers the common core/v1, apps/v1, batch/v1, networking, RBAC and
//! autoscaling kinds together with the sub-object contexts needed to nest
//! them. Deep convenience paths (a `Container` directly under a
//! `Deployment`) coexist with the canonical short ones (under `PodSpec`);
//! nearest-ancestor resolution picks whichever matches the authored tree.
//! Anything missing here is added through a registry extension file.

use kubeweave_core::{Arity, Disambiguator};
use once_cell::sync::Lazy;

use crate::builder::RegistryBuilder;
use crate::registry::ContextRegistry;

// core/v1
const POD: &str = "io.k8s.api.core.v1.Pod";
const SERVICE: &str = "io.k8s.api.core.v1.Service";
const CONFIG_MAP: &str = "io.k8s.api.core.v1.ConfigMap";
const SECRET: &str = "io.k8s.api.core.v1.Secret";
const NAMESPACE: &str = "io.k8s.api.core.v1.Namespace";
const SERVICE_ACCOUNT: &str = "io.k8s.api.core.v1.ServiceAccount";
const ENDPOINTS: &str = "io.k8s.api.core.v1.Endpoints";
const PVC: &str = "io.k8s.api.core.v1.PersistentVolumeClaim";
const RESOURCE_QUOTA: &str = "io.k8s.api.core.v1.ResourceQuota";
const LIMIT_RANGE: &str = "io.k8s.api.core.v1.LimitRange";

const POD_SPEC: &str = "io.k8s.api.core.v1.PodSpec";
const POD_TEMPLATE: &str = "io.k8s.api.core.v1.PodTemplateSpec";
const CONTAINER: &str = "io.k8s.api.core.v1.Container";
const ENV_VAR: &str = "io.k8s.api.core.v1.EnvVar";
const ENV_VAR_SOURCE: &str = "io.k8s.api.core.v1.EnvVarSource";
const ENV_FROM: &str = "io.k8s.api.core.v1.EnvFromSource";
const CONTAINER_PORT: &str = "io.k8s.api.core.v1.ContainerPort";
const VOLUME_MOUNT: &str = "io.k8s.api.core.v1.VolumeMount";
const PROBE: &str = "io.k8s.api.core.v1.Probe";
const RESOURCE_REQUIREMENTS: &str = "io.k8s.api.core.v1.ResourceRequirements";
const SECURITY_CONTEXT: &str = "io.k8s.api.core.v1.SecurityContext";
const LIFECYCLE: &str = "io.k8s.api.core.v1.Lifecycle";
const LIFECYCLE_HANDLER: &str = "io.k8s.api.core.v1.LifecycleHandler";
const POD_SECURITY_CONTEXT: &str = "io.k8s.api.core.v1.PodSecurityContext";
const VOLUME: &str = "io.k8s.api.core.v1.Volume";
const TOLERATION: &str = "io.k8s.api.core.v1.Toleration";
const AFFINITY: &str = "io.k8s.api.core.v1.Affinity";
const TOPOLOGY_SPREAD: &str = "io.k8s.api.core.v1.TopologySpreadConstraint";
const HOST_ALIAS: &str = "io.k8s.api.core.v1.HostAlias";
const LOCAL_OBJECT_REF: &str = "io.k8s.api.core.v1.LocalObjectReference";
const CONFIG_MAP_VOLUME: &str = "io.k8s.api.core.v1.ConfigMapVolumeSource";
const SECRET_VOLUME: &str = "io.k8s.api.core.v1.SecretVolumeSource";
const PVC_VOLUME: &str = "io.k8s.api.core.v1.PersistentVolumeClaimVolumeSource";
const EMPTY_DIR_VOLUME: &str = "io.k8s.api.core.v1.EmptyDirVolumeSource";
const KEY_TO_PATH: &str = "io.k8s.api.core.v1.KeyToPath";
const SECRET_KEY_SELECTOR: &str = "io.k8s.api.core.v1.SecretKeySelector";
const CONFIG_MAP_KEY_SELECTOR: &str = "io.k8s.api.core.v1.ConfigMapKeySelector";
const SERVICE_SPEC: &str = "io.k8s.api.core.v1.ServiceSpec";
const SERVICE_PORT: &str = "io.k8s.api.core.v1.ServicePort";
const SERVICE_STATUS: &str = "io.k8s.api.core.v1.ServiceStatus";
const PORT_STATUS: &str = "io.k8s.api.core.v1.PortStatus";
const ENDPOINT_SUBSET: &str = "io.k8s.api.core.v1.EndpointSubset";
const ENDPOINT_ADDRESS: &str = "io.k8s.api.core.v1.EndpointAddress";
const ENDPOINT_PORT: &str = "io.k8s.api.core.v1.EndpointPort";
const PVC_SPEC: &str = "io.k8s.api.core.v1.PersistentVolumeClaimSpec";
const LIMIT_RANGE_ITEM: &str = "io.k8s.api.core.v1.LimitRangeItem";

// apps/v1
const DEPLOYMENT: &str = "io.k8s.api.apps.v1.Deployment";
const STATEFUL_SET: &str = "io.k8s.api.apps.v1.StatefulSet";
const DAEMON_SET: &str = "io.k8s.api.apps.v1.DaemonSet";
const REPLICA_SET: &str = "io.k8s.api.apps.v1.ReplicaSet";
const DEPLOYMENT_STRATEGY: &str = "io.k8s.api.apps.v1.DeploymentStrategy";
const ROLLING_UPDATE: &str = "io.k8s.api.apps.v1.RollingUpdateDeployment";

// batch/v1
const JOB: &str = "io.k8s.api.batch.v1.Job";
const CRON_JOB: &str = "io.k8s.api.batch.v1.CronJob";
const JOB_TEMPLATE: &str = "io.k8s.api.batch.v1.JobTemplateSpec";

// networking.k8s.io/v1
const INGRESS: &str = "io.k8s.api.networking.v1.Ingress";
const NETWORK_POLICY: &str = "io.k8s.api.networking.v1.NetworkPolicy";
const INGRESS_RULE: &str = "io.k8s.api.networking.v1.IngressRule";
const INGRESS_TLS: &str = "io.k8s.api.networking.v1.IngressTLS";
const HTTP_INGRESS_PATH: &str = "io.k8s.api.networking.v1.HTTPIngressPath";
const INGRESS_BACKEND: &str = "io.k8s.api.networking.v1.IngressBackend";
const INGRESS_SERVICE_BACKEND: &str = "io.k8s.api.networking.v1.IngressServiceBackend";
const SERVICE_BACKEND_PORT: &str = "io.k8s.api.networking.v1.ServiceBackendPort";
const NP_INGRESS_RULE: &str = "io.k8s.api.networking.v1.NetworkPolicyIngressRule";
const NP_EGRESS_RULE: &str = "io.k8s.api.networking.v1.NetworkPolicyEgressRule";
const NP_PEER: &str = "io.k8s.api.networking.v1.NetworkPolicyPeer";
const NP_PORT: &str = "io.k8s.api.networking.v1.NetworkPolicyPort";

// rbac.authorization.k8s.io/v1
const ROLE: &str = "io.k8s.api.rbac.v1.Role";
const ROLE_BINDING: &str = "io.k8s.api.rbac.v1.RoleBinding";
const CLUSTER_ROLE: &str = "io.k8s.api.rbac.v1.ClusterRole";
const CLUSTER_ROLE_BINDING: &str = "io.k8s.api.rbac.v1.ClusterRoleBinding";
const POLICY_RULE: &str = "io.k8s.api.rbac.v1.PolicyRule";
const SUBJECT: &str = "io.k8s.api.rbac.v1.Subject";
const ROLE_REF: &str = "io.k8s.api.rbac.v1.RoleRef";

// autoscaling/v2
const HPA: &str = "io.k8s.api.autoscaling.v2.HorizontalPodAutoscaler";
const CROSS_VERSION_REF: &str = "io.k8s.api.autoscaling.v2.CrossVersionObjectReference";
const METRIC_SPEC: &str = "io.k8s.api.autoscaling.v2.MetricSpec";
const HPA_BEHAVIOR: &str = "io.k8s.api.autoscaling.v2.HorizontalPodAutoscalerBehavior";
const HPA_SCALING_RULES: &str = "io.k8s.api.autoscaling.v2.HPAScalingRules";
const HPA_SCALING_POLICY: &str = "io.k8s.api.autoscaling.v2.HPAScalingPolicy";

// apimachinery meta/v1
const LABEL_SELECTOR: &str = "io.k8s.apimachinery.pkg.apis.meta.v1.LabelSelector";
const LABEL_SELECTOR_REQUIREMENT: &str =
    "io.k8s.apimachinery.pkg.apis.meta.v1.LabelSelectorRequirement";

struct ResourceRow {
    id: &'static str,
    api_version: &'static str,
    kind: &'static str,
}

enum Selector {
    None,
    Alias(&'static str),
    DefaultAlias(&'static str),
    Flag(&'static str),
}

impl Selector {
    fn disambiguator(&self) -> Option<Disambiguator> {
        match self {
            Selector::None => None,
            Selector::Alias(name) => Some(Disambiguator::alias(*name)),
            Selector::DefaultAlias(name) => Some(Disambiguator::default_alias(*name)),
            Selector::Flag(name) => Some(Disambiguator::flag(*name)),
        }
    }
}

struct ContextRow {
    child: &'static str,
    parent: &'static str,
    path: &'static str,
    arity: Arity,
    selector: Selector,
}

const fn scalar(child: &'static str, parent: &'static str, path: &'static str) -> ContextRow {
    ContextRow {
        child,
        parent,
        path,
        arity: Arity::Scalar,
        selector: Selector::None,
    }
}

const fn list(child: &'static str, parent: &'static str, path: &'static str) -> ContextRow {
    ContextRow {
        child,
        parent,
        path,
        arity: Arity::List,
        selector: Selector::None,
    }
}

const fn alias(
    child: &'static str,
    parent: &'static str,
    path: &'static str,
    arity: Arity,
    name: &'static str,
) -> ContextRow {
    ContextRow {
        child,
        parent,
        path,
        arity,
        selector: Selector::Alias(name),
    }
}

const fn default_alias(
    child: &'static str,
    parent: &'static str,
    path: &'static str,
    arity: Arity,
    name: &'static str,
) -> ContextRow {
    ContextRow {
        child,
        parent,
        path,
        arity,
        selector: Selector::DefaultAlias(name),
    }
}

const fn flag(
    child: &'static str,
    parent: &'static str,
    path: &'static str,
    name: &'static str,
) -> ContextRow {
    ContextRow {
        child,
        parent,
        path,
        arity: Arity::Scalar,
        selector: Selector::Flag(name),
    }
}

static RESOURCES: &[ResourceRow] = &[
    ResourceRow { id: POD, api_version: "v1", kind: "Pod" },
    ResourceRow { id: SERVICE, api_version: "v1", kind: "Service" },
    ResourceRow { id: CONFIG_MAP, api_version: "v1", kind: "ConfigMap" },
    ResourceRow { id: SECRET, api_version: "v1", kind: "Secret" },
    ResourceRow { id: NAMESPACE, api_version: "v1", kind: "Namespace" },
    ResourceRow { id: SERVICE_ACCOUNT, api_version: "v1", kind: "ServiceAccount" },
    ResourceRow { id: ENDPOINTS, api_version: "v1", kind: "Endpoints" },
    ResourceRow { id: PVC, api_version: "v1", kind: "PersistentVolumeClaim" },
    ResourceRow { id: RESOURCE_QUOTA, api_version: "v1", kind: "ResourceQuota" },
    ResourceRow { id: LIMIT_RANGE, api_version: "v1", kind: "LimitRange" },
    ResourceRow { id: DEPLOYMENT, api_version: "apps/v1", kind: "Deployment" },
    ResourceRow { id: STATEFUL_SET, api_version: "apps/v1", kind: "StatefulSet" },
    ResourceRow { id: DAEMON_SET, api_version: "apps/v1", kind: "DaemonSet" },
    ResourceRow { id: REPLICA_SET, api_version: "apps/v1", kind: "ReplicaSet" },
    ResourceRow { id: JOB, api_version: "batch/v1", kind: "Job" },
    ResourceRow { id: CRON_JOB, api_version: "batch/v1", kind: "CronJob" },
    ResourceRow { id: INGRESS, api_version: "networking.k8s.io/v1", kind: "Ingress" },
    ResourceRow { id: NETWORK_POLICY, api_version: "networking.k8s.io/v1", kind: "NetworkPolicy" },
    ResourceRow { id: ROLE, api_version: "rbac.authorization.k8s.io/v1", kind: "Role" },
    ResourceRow { id: ROLE_BINDING, api_version: "rbac.authorization.k8s.io/v1", kind: "RoleBinding" },
    ResourceRow { id: CLUSTER_ROLE, api_version: "rbac.authorization.k8s.io/v1", kind: "ClusterRole" },
    ResourceRow { id: CLUSTER_ROLE_BINDING, api_version: "rbac.authorization.k8s.io/v1", kind: "ClusterRoleBinding" },
    ResourceRow { id: HPA, api_version: "autoscaling/v2", kind: "HorizontalPodAutoscaler" },
];

static CONTEXTS: &[ContextRow] = &[
    // pod wiring
    scalar(POD_SPEC, POD, "spec"),
    scalar(POD_SPEC, POD_TEMPLATE, "spec"),
    scalar(POD_TEMPLATE, DEPLOYMENT, "spec.template"),
    scalar(POD_TEMPLATE, STATEFUL_SET, "spec.template"),
    scalar(POD_TEMPLATE, DAEMON_SET, "spec.template"),
    scalar(POD_TEMPLATE, REPLICA_SET, "spec.template"),
    scalar(POD_TEMPLATE, JOB, "spec.template"),
    scalar(POD_TEMPLATE, JOB_TEMPLATE, "spec.template"),
    scalar(JOB_TEMPLATE, CRON_JOB, "spec.jobTemplate"),
    scalar(POD_SPEC, DEPLOYMENT, "spec.template.spec"),
    scalar(POD_SPEC, STATEFUL_SET, "spec.template.spec"),
    scalar(POD_SPEC, DAEMON_SET, "spec.template.spec"),
    scalar(POD_SPEC, REPLICA_SET, "spec.template.spec"),
    scalar(POD_SPEC, JOB, "spec.template.spec"),
    scalar(POD_SPEC, CRON_JOB, "spec.jobTemplate.spec.template.spec"),
    // containers, canonical and deep convenience placements
    default_alias(CONTAINER, POD_SPEC, "containers", Arity::List, "containers"),
    alias(CONTAINER, POD_SPEC, "initContainers", Arity::List, "initContainers"),
    default_alias(CONTAINER, POD, "spec.containers", Arity::List, "containers"),
    alias(CONTAINER, POD, "spec.initContainers", Arity::List, "initContainers"),
    default_alias(CONTAINER, POD_TEMPLATE, "spec.containers", Arity::List, "containers"),
    alias(CONTAINER, POD_TEMPLATE, "spec.initContainers", Arity::List, "initContainers"),
    default_alias(CONTAINER, DEPLOYMENT, "spec.template.spec.containers", Arity::List, "containers"),
    alias(CONTAINER, DEPLOYMENT, "spec.template.spec.initContainers", Arity::List, "initContainers"),
    default_alias(CONTAINER, STATEFUL_SET, "spec.template.spec.containers", Arity::List, "containers"),
    alias(CONTAINER, STATEFUL_SET, "spec.template.spec.initContainers", Arity::List, "initContainers"),
    default_alias(CONTAINER, DAEMON_SET, "spec.template.spec.containers", Arity::List, "containers"),
    alias(CONTAINER, DAEMON_SET, "spec.template.spec.initContainers", Arity::List, "initContainers"),
    default_alias(CONTAINER, REPLICA_SET, "spec.template.spec.containers", Arity::List, "containers"),
    alias(CONTAINER, REPLICA_SET, "spec.template.spec.initContainers", Arity::List, "initContainers"),
    default_alias(CONTAINER, JOB, "spec.template.spec.containers", Arity::List, "containers"),
    alias(CONTAINER, JOB, "spec.template.spec.initContainers", Arity::List, "initContainers"),
    default_alias(CONTAINER, CRON_JOB, "spec.jobTemplate.spec.template.spec.containers", Arity::List, "containers"),
    alias(CONTAINER, CRON_JOB, "spec.jobTemplate.spec.template.spec.initContainers", Arity::List, "initContainers"),
    // container internals
    list(ENV_VAR, CONTAINER, "env"),
    list(ENV_FROM, CONTAINER, "envFrom"),
    list(CONTAINER_PORT, CONTAINER, "ports"),
    list(VOLUME_MOUNT, CONTAINER, "volumeMounts"),
    alias(PROBE, CONTAINER, "livenessProbe", Arity::Scalar, "livenessProbe"),
    alias(PROBE, CONTAINER, "readinessProbe", Arity::Scalar, "readinessProbe"),
    alias(PROBE, CONTAINER, "startupProbe", Arity::Scalar, "startupProbe"),
    scalar(RESOURCE_REQUIREMENTS, CONTAINER, "resources"),
    scalar(SECURITY_CONTEXT, CONTAINER, "securityContext"),
    scalar(LIFECYCLE, CONTAINER, "lifecycle"),
    flag(LIFECYCLE_HANDLER, LIFECYCLE, "postStart", "postStart"),
    flag(LIFECYCLE_HANDLER, LIFECYCLE, "preStop", "preStop"),
    scalar(ENV_VAR_SOURCE, ENV_VAR, "valueFrom"),
    scalar(SECRET_KEY_SELECTOR, ENV_VAR_SOURCE, "secretKeyRef"),
    scalar(CONFIG_MAP_KEY_SELECTOR, ENV_VAR_SOURCE, "configMapKeyRef"),
    // pod spec internals
    scalar(POD_SECURITY_CONTEXT, POD_SPEC, "securityContext"),
    list(VOLUME, POD_SPEC, "volumes"),
    list(TOLERATION, POD_SPEC, "tolerations"),
    scalar(AFFINITY, POD_SPEC, "affinity"),
    list(TOPOLOGY_SPREAD, POD_SPEC, "topologySpreadConstraints"),
    list(HOST_ALIAS, POD_SPEC, "hostAliases"),
    list(LOCAL_OBJECT_REF, POD_SPEC, "imagePullSecrets"),
    list(LOCAL_OBJECT_REF, SERVICE_ACCOUNT, "imagePullSecrets"),
    // volume sources
    scalar(CONFIG_MAP_VOLUME, VOLUME, "configMap"),
    scalar(SECRET_VOLUME, VOLUME, "secret"),
    scalar(PVC_VOLUME, VOLUME, "persistentVolumeClaim"),
    scalar(EMPTY_DIR_VOLUME, VOLUME, "emptyDir"),
    list(KEY_TO_PATH, CONFIG_MAP_VOLUME, "items"),
    list(KEY_TO_PATH, SECRET_VOLUME, "items"),
    // services and endpoints
    scalar(SERVICE_SPEC, SERVICE, "spec"),
    list(SERVICE_PORT, SERVICE, "spec.ports"),
    list(SERVICE_PORT, SERVICE_SPEC, "ports"),
    scalar(SERVICE_STATUS, SERVICE, "status"),
    list(PORT_STATUS, SERVICE_STATUS, "loadBalancer.ingress[].ports"),
    list(ENDPOINT_SUBSET, ENDPOINTS, "subsets"),
    default_alias(ENDPOINT_ADDRESS, ENDPOINT_SUBSET, "addresses", Arity::List, "addresses"),
    alias(ENDPOINT_ADDRESS, ENDPOINT_SUBSET, "notReadyAddresses", Arity::List, "notReadyAddresses"),
    default_alias(ENDPOINT_ADDRESS, ENDPOINTS, "subsets[].addresses", Arity::List, "addresses"),
    alias(ENDPOINT_ADDRESS, ENDPOINTS, "subsets[].notReadyAddresses", Arity::List, "notReadyAddresses"),
    list(ENDPOINT_PORT, ENDPOINT_SUBSET, "ports"),
    list(ENDPOINT_PORT, ENDPOINTS, "subsets[].ports"),
    // label selectors
    scalar(LABEL_SELECTOR, DEPLOYMENT, "spec.selector"),
    scalar(LABEL_SELECTOR, STATEFUL_SET, "spec.selector"),
    scalar(LABEL_SELECTOR, DAEMON_SET, "spec.selector"),
    scalar(LABEL_SELECTOR, REPLICA_SET, "spec.selector"),
    scalar(LABEL_SELECTOR, JOB, "spec.selector"),
    scalar(LABEL_SELECTOR, NETWORK_POLICY, "spec.podSelector"),
    scalar(LABEL_SELECTOR, PVC_SPEC, "selector"),
    list(LABEL_SELECTOR_REQUIREMENT, LABEL_SELECTOR, "matchExpressions"),
    // claims, quotas, strategies
    scalar(PVC_SPEC, PVC, "spec"),
    scalar(RESOURCE_REQUIREMENTS, PVC_SPEC, "resources"),
    list(PVC, STATEFUL_SET, "spec.volumeClaimTemplates"),
    list(LIMIT_RANGE_ITEM, LIMIT_RANGE, "spec.limits"),
    scalar(DEPLOYMENT_STRATEGY, DEPLOYMENT, "spec.strategy"),
    scalar(ROLLING_UPDATE, DEPLOYMENT_STRATEGY, "rollingUpdate"),
    // ingress
    list(INGRESS_RULE, INGRESS, "spec.rules"),
    list(INGRESS_TLS, INGRESS, "spec.tls"),
    list(HTTP_INGRESS_PATH, INGRESS_RULE, "http.paths"),
    scalar(INGRESS_BACKEND, HTTP_INGRESS_PATH, "backend"),
    scalar(INGRESS_BACKEND, INGRESS, "spec.defaultBackend"),
    scalar(INGRESS_SERVICE_BACKEND, INGRESS_BACKEND, "service"),
    scalar(SERVICE_BACKEND_PORT, INGRESS_SERVICE_BACKEND, "port"),
    // network policy
    list(NP_INGRESS_RULE, NETWORK_POLICY, "spec.ingress"),
    list(NP_EGRESS_RULE, NETWORK_POLICY, "spec.egress"),
    list(NP_PEER, NP_INGRESS_RULE, "from"),
    list(NP_PEER, NP_EGRESS_RULE, "to"),
    list(NP_PORT, NP_INGRESS_RULE, "ports"),
    list(NP_PORT, NP_EGRESS_RULE, "ports"),
    // rbac
    list(POLICY_RULE, ROLE, "rules"),
    list(POLICY_RULE, CLUSTER_ROLE, "rules"),
    list(SUBJECT, ROLE_BINDING, "subjects"),
    list(SUBJECT, CLUSTER_ROLE_BINDING, "subjects"),
    scalar(ROLE_REF, ROLE_BINDING, "roleRef"),
    scalar(ROLE_REF, CLUSTER_ROLE_BINDING, "roleRef"),
    // autoscaling
    scalar(CROSS_VERSION_REF, HPA, "spec.scaleTargetRef"),
    list(METRIC_SPEC, HPA, "spec.metrics"),
    scalar(HPA_BEHAVIOR, HPA, "spec.behavior"),
    flag(HPA_SCALING_RULES, HPA_BEHAVIOR, "scaleUp", "scaleUp"),
    flag(HPA_SCALING_RULES, HPA_BEHAVIOR, "scaleDown", "scaleDown"),
    list(HPA_SCALING_POLICY, HPA_SCALING_RULES, "policies"),
];

/// Append every built-in declaration to `builder`
pub(crate) fn seed(mut builder: RegistryBuilder) -> RegistryBuilder {
    for row in RESOURCES {
        builder = builder.resource(row.id, row.api_version, row.kind);
    }
    for row in CONTEXTS {
        builder = builder.context(
            row.child,
            row.parent,
            row.path,
            row.arity,
            row.selector.disambiguator(),
        );
    }
    builder
}

static BUILTIN: Lazy<ContextRegistry> = Lazy::new(|| {
    RegistryBuilder::with_builtin()
        .finish()
        .expect("builtin placement table is internally consistent")
});

/// The shared built-in registry, validated and assembled on first use
pub fn builtin() -> &'static ContextRegistry {
    &BUILTIN
}
