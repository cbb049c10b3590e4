/// Values interpolated into the recording page.
#[derive(Debug, Clone, PartialEq)]
pub struct MobileRecordPage {
    pub channel_display: String,
    pub is_thread_reply: bool,
    /// Same-origin upload target, token included.
    pub upload_url: String,
    pub max_seconds: u64,
}

/// Renders the standalone recording page. Text lands HTML-escaped, values
/// handed to the script are JSON literals that cannot close the script tag.
pub fn render_mobile_record_page(page: &MobileRecordPage) -> String {
    let badge = if page.is_thread_reply {
        r#"<span class="badge">Thread reply</span>"#
    } else {
        ""
    };

    let mut html = String::with_capacity(
        PAGE_HEAD.len() + PAGE_CONTROLS.len() + PAGE_SCRIPT.len() + 512,
    );
    html.push_str(PAGE_HEAD);
    html.push_str(&format!(
        "<header><h1>Voice message</h1>{badge}</header>\n<div class=\"meta\">Channel: <b>{channel}</b> &middot; Limit: <b>{limit}</b></div>\n",
        badge = badge,
        channel = escape_html(&page.channel_display),
        limit = format_limit(page.max_seconds),
    ));
    html.push_str(PAGE_CONTROLS);
    html.push_str(&format!(
        "<script>\nvar uploadUrl = {};\nvar maxSeconds = {};\n",
        script_string(&page.upload_url),
        page.max_seconds,
    ));
    html.push_str(PAGE_SCRIPT);
    html
}

/// `mm:ss` shown next to the channel name.
pub fn format_limit(seconds: u64) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn script_string(value: &str) -> String {
    serde_json::Value::String(value.to_string())
        .to_string()
        .replace("</", "<\\/")
        .replace('\u{2028}', "\\u2028")
        .replace('\u{2029}', "\\u2029")
}

const PAGE_HEAD: &str = r##"<!doctype html>
<html lang="en">
<head>
<meta charset="utf-8"/>
<meta name="viewport" content="width=device-width,initial-scale=1,viewport-fit=cover"/>
<title>Voice Message</title>
<style>
*{box-sizing:border-box;margin:0;padding:0}
body{font-family:-apple-system,BlinkMacSystemFont,'Segoe UI',Roboto,Helvetica,Arial,sans-serif;background:#0c1017;color:#e8edf4;padding:16px;display:flex;justify-content:center;min-height:100vh}
.card{width:100%;max-width:420px;background:#131a27;border:1px solid #1e2d44;border-radius:16px;padding:20px;display:flex;flex-direction:column;gap:16px}
header{display:flex;align-items:center;justify-content:space-between}
h1{font-size:18px}
.badge{font-size:12px;padding:2px 8px;border-radius:999px;background:rgba(59,130,246,.25);color:#93c5fd}
.meta{font-size:13px;color:#8899ad}
.timer{font-size:40px;font-variant-numeric:tabular-nums;text-align:center}
.rec{width:88px;height:88px;border-radius:50%;border:none;background:#ef4444;color:#fff;font-size:15px;margin:0 auto;display:block}
.rec.active{background:#b91c1c}
.row{display:flex;gap:8px}
.row button{flex:1;padding:12px;border-radius:12px;border:1px solid #1e2d44;background:#182236;color:#e8edf4;font-size:15px}
.row button.primary{background:#3b82f6;border-color:#3b82f6}
button:disabled{opacity:.4}
audio{width:100%}
.status{min-height:20px;font-size:14px;text-align:center;color:#8899ad}
.status.err{color:#ef4444}
.status.ok{color:#22c55e}
a.sent{display:none;text-align:center;color:#93c5fd}
label.file{font-size:13px;color:#8899ad;text-align:center}
</style>
</head>
<body>
<main class="card">
"##;

const PAGE_CONTROLS: &str = r##"<div class="timer" id="timer">00:00</div>
<button class="rec" id="recBtn" type="button">Record</button>
<audio id="preview" controls hidden></audio>
<div class="row">
<button id="resetBtn" type="button" disabled>Discard</button>
<button id="sendBtn" class="primary" type="button" disabled>Send</button>
</div>
<label class="file">or choose a file <input id="fileInput" type="file" accept="audio/*"/></label>
<div class="status" id="status"></div>
<a class="sent" id="sentLink" href="#">Open message</a>
</main>
"##;

const PAGE_SCRIPT: &str = r##"(function(){
  var stream=null,rec=null,chunks=[],blob=null,startedAt=0,elapsed=0,tick=null;
  var elTimer=document.getElementById('timer'),elStatus=document.getElementById('status');
  var recBtn=document.getElementById('recBtn'),sendBtn=document.getElementById('sendBtn');
  var resetBtn=document.getElementById('resetBtn'),preview=document.getElementById('preview');
  var fileInput=document.getElementById('fileInput'),sentLink=document.getElementById('sentLink');

  function pad(n){return (n<10?'0':'')+n}
  function show(s){elTimer.textContent=pad(Math.floor(s/60))+':'+pad(s%60)}
  function setStatus(t,cls){elStatus.textContent=t;elStatus.className='status'+(cls?' '+cls:'')}
  function release(){if(tick){clearInterval(tick);tick=null}if(stream){stream.getTracks().forEach(function(t){t.stop()});stream=null}}
  function ready(){recBtn.classList.remove('active');recBtn.textContent='Record';sendBtn.disabled=!blob;resetBtn.disabled=!blob;
    if(blob){preview.src=URL.createObjectURL(blob);preview.hidden=false}}

  function start(){
    if(!navigator.mediaDevices||!window.MediaRecorder){setStatus('Recording is not supported here. Choose a file instead.','err');return}
    navigator.mediaDevices.getUserMedia({audio:true}).then(function(s){
      stream=s;chunks=[];blob=null;rec=new MediaRecorder(s);
      rec.ondataavailable=function(e){if(e.data&&e.data.size)chunks.push(e.data)};
      rec.onstop=function(){blob=new Blob(chunks,{type:rec.mimeType||'audio/webm'});release();ready()};
      rec.start();startedAt=Date.now();elapsed=0;show(0);
      recBtn.classList.add('active');recBtn.textContent='Stop';setStatus('Recording…');
      tick=setInterval(function(){elapsed=Math.floor((Date.now()-startedAt)/1000);show(elapsed);
        if(maxSeconds>0&&elapsed>=maxSeconds){stop()}},250);
    }).catch(function(){setStatus('Microphone permission denied.','err')});
  }
  function stop(){if(rec&&rec.state!=='inactive'){rec.stop();setStatus('')}}

  recBtn.addEventListener('click',function(){if(rec&&rec.state==='recording'){stop()}else{start()}});
  resetBtn.addEventListener('click',function(){blob=null;chunks=[];elapsed=0;show(0);preview.hidden=true;setStatus('');ready()});
  fileInput.addEventListener('change',function(){var f=fileInput.files&&fileInput.files[0];if(!f)return;
    blob=f;elapsed=0;release();ready()});

  sendBtn.addEventListener('click',function(){
    if(!blob){setStatus('No recording.','err');return}
    sendBtn.disabled=true;resetBtn.disabled=true;setStatus('Uploading…');
    var url=uploadUrl+(elapsed>0?'&duration='+elapsed:'');
    fetch(url,{method:'POST',body:blob,credentials:'include',
      headers:{'Content-Type':blob.type||'application/octet-stream','X-Requested-With':'XMLHttpRequest'}})
    .then(function(res){return res.text().then(function(t){return{ok:res.ok,status:res.status,text:t}})})
    .then(function(r){
      if(!r.ok){setStatus('Upload error: '+r.status,'err');ready();return}
      var data=null;try{data=JSON.parse(r.text)}catch(e){}
      setStatus('Voice message sent.','ok');recBtn.disabled=true;fileInput.disabled=true;
      if(data&&data.permalink){sentLink.href=data.permalink;sentLink.style.display='block'}
    })
    .catch(function(){setStatus('Network error. Try again.','err');ready()});
  });
})();
</script>
</body>
</html>
"##;
