//! 总览面板
//!
//! 纯展示页面：统计卡片、最近工单、告警列表。

use leptos::prelude::*;

use crate::components::icons::*;

#[component]
pub fn DashboardPage() -> impl IntoView {
    // 名称, 数值, 变化幅度, 是否上升
    let stats = [
        ("Clientes Ativos", "521", "+4.75%", true),
        ("Aparelhos em Reparo", "42", "-1.39%", false),
        ("OS Abertas", "38", "+2.45%", true),
        ("Itens com Estoque Baixo", "12", "+5.23%", true),
    ];

    // 客户, 设备, 状态, 日期
    let recent_orders = [
        ("João Silva", "iPhone 12", "Em análise", "2024-03-10"),
        ("Maria Santos", "Notebook Dell", "Aguardando peça", "2024-03-09"),
        ("Pedro Oliveira", "Impressora HP", "Em reparo", "2024-03-08"),
        ("Ana Costa", "Samsung S21", "Pronto", "2024-03-07"),
    ];

    view! {
        <div class="space-y-8">
            <h1 class="text-2xl font-semibold">"Dashboard"</h1>

            <div class="grid grid-cols-1 gap-5 sm:grid-cols-2 lg:grid-cols-4">
                {stats
                    .into_iter()
                    .map(|(name, value, change, increase)| {
                        view! {
                            <div class="stats shadow bg-base-100">
                                <div class="stat">
                                    <div class="stat-title truncate">{name}</div>
                                    <div class="stat-value text-primary">{value}</div>
                                    <div class=if increase {
                                        "stat-desc text-success font-semibold"
                                    } else {
                                        "stat-desc text-error font-semibold"
                                    }>{change}</div>
                                </div>
                            </div>
                        }
                    })
                    .collect_view()}
            </div>

            <div class="grid grid-cols-1 gap-5 lg:grid-cols-2">
                // 最近工单
                <div class="card bg-base-100 shadow">
                    <div class="card-body p-0">
                        <div class="px-6 py-5 border-b border-base-300">
                            <h3 class="card-title text-lg">"Ordens Recentes"</h3>
                        </div>
                        <div class="divide-y divide-base-300">
                            {recent_orders
                                .into_iter()
                                .map(|(customer, device, status, date)| {
                                    view! {
                                        <div class="px-6 py-4">
                                            <div class="flex items-center justify-between">
                                                <p class="text-sm font-medium text-primary truncate">{customer}</p>
                                                <span class="badge badge-success badge-outline text-xs">{status}</span>
                                            </div>
                                            <div class="mt-2 flex justify-between text-sm text-base-content/60">
                                                <span class="flex items-center gap-1.5">
                                                    <Laptop attr:class="h-5 w-5" />
                                                    {device}
                                                </span>
                                                <span class="flex items-center gap-1.5">
                                                    <Clock attr:class="h-5 w-5" />
                                                    {date}
                                                </span>
                                            </div>
                                        </div>
                                    }
                                })
                                .collect_view()}
                        </div>
                    </div>
                </div>

                // 告警
                <div class="card bg-base-100 shadow">
                    <div class="card-body p-0">
                        <div class="px-6 py-5 border-b border-base-300">
                            <h3 class="card-title text-lg">"Alertas"</h3>
                        </div>
                        <div class="p-4 divide-y divide-base-300">
                            <div class="flex items-start gap-3 py-3">
                                <AlertTriangle attr:class="h-5 w-5 text-warning shrink-0" />
                                <p class="text-sm text-base-content/70">
                                    "5 itens com estoque abaixo do mínimo"
                                </p>
                            </div>
                            <div class="flex items-start gap-3 py-3">
                                <CheckCircle attr:class="h-5 w-5 text-success shrink-0" />
                                <p class="text-sm text-base-content/70">
                                    "12 aparelhos prontos para entrega"
                                </p>
                            </div>
                            <div class="flex items-start gap-3 py-3">
                                <Clock attr:class="h-5 w-5 text-info shrink-0" />
                                <p class="text-sm text-base-content/70">"8 ordens atrasadas"</p>
                            </div>
                        </div>
                    </div>
                </div>
            </div>
        </div>
    }
}
